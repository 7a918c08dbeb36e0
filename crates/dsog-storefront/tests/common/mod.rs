//! Scripted catalog endpoint shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dsog_data::{FetchError, Gateway, Response};
use dsog_storefront::{AppContext, MemorySessionStore, Storefront, StorefrontConfig};
use serde_json::{json, Value};
use url::Url;

pub const ENDPOINT: &str = "https://catalog.test/exec";

/// What the endpoint answers for a collection.
#[derive(Clone)]
pub enum Reply {
    /// `{success: true, data: [...]}`.
    Products(Vec<Value>),
    /// Raw status and body.
    Raw(u16, &'static str),
    /// Connection failure.
    Down,
}

/// In-memory catalog endpoint. Counts product requests per collection.
pub struct ScriptedGateway {
    replies: Mutex<HashMap<String, Reply>>,
    default_reply: Reply,
    delay: Duration,
    product_calls: Mutex<HashMap<String, usize>>,
    posts: Mutex<Vec<Value>>,
    order_reply: Mutex<Value>,
    total_gets: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            default_reply: Reply::Products(Vec::new()),
            delay: Duration::ZERO,
            product_calls: Mutex::new(HashMap::new()),
            posts: Mutex::new(Vec::new()),
            order_reply: Mutex::new(json!({
                "success": true,
                "orderNumber": "DSOG-20261019-0A1B2C",
                "orderId": 41
            })),
            total_gets: AtomicUsize::new(0),
        }
    }

    /// Every product request takes `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_default(mut self, reply: Reply) -> Self {
        self.default_reply = reply;
        self
    }

    pub fn reply(self, collection: &str, reply: Reply) -> Self {
        self.set_reply(collection, reply);
        self
    }

    pub fn set_reply(&self, collection: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert(collection.to_string(), reply);
    }

    pub fn calls(&self, collection: &str) -> usize {
        self.product_calls
            .lock()
            .unwrap()
            .get(collection)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_gets(&self) -> usize {
        self.total_gets.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<Value> {
        self.posts.lock().unwrap().clone()
    }

    fn products_reply(&self, collection: &str) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        self.total_gets.fetch_add(1, Ordering::SeqCst);
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

        match query.get("action").map(String::as_str) {
            Some("getProducts") => {
                let collection = query.get("collection").cloned().unwrap_or_default();
                *self
                    .product_calls
                    .lock()
                    .unwrap()
                    .entry(collection.clone())
                    .or_default() += 1;

                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }

                match self.products_reply(&collection) {
                    Reply::Products(data) => {
                        Ok(Response::json_ok(&json!({"success": true, "data": data})))
                    }
                    Reply::Raw(status, body) => Ok(Response::new(
                        status,
                        HashMap::new(),
                        body.as_bytes().to_vec(),
                    )),
                    Reply::Down => Err(FetchError::Transport("connection refused".into())),
                }
            }
            Some("getSettings") => Ok(Response::json_ok(&json!({
                "success": true,
                "data": {"store_name": "DSOG STORES", "delivery_fee_express": 300}
            }))),
            Some("getCategories") => Ok(Response::json_ok(&json!({
                "success": true,
                "data": [
                    {"id": 1, "name": "Hoodies", "slug": "hoodie", "display_order": 1},
                    {"id": 2, "name": "T-Shirts", "slug": "tshirt", "display_order": 2}
                ]
            }))),
            _ => Ok(Response::json_ok(
                &json!({"success": false, "error": "Invalid action"}),
            )),
        }
    }

    async fn post_json(&self, _url: &Url, body: &Value) -> Result<Response, FetchError> {
        self.posts.lock().unwrap().push(body.clone());
        Ok(Response::json_ok(&self.order_reply.lock().unwrap()))
    }
}

pub fn product(id: u32, name: &str, category: &str, price: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": category,
        "basePrice": price,
        "images": [
            format!("https://img.test/{id}-front.jpg"),
            format!("https://img.test/{id}-back.jpg")
        ],
        "stock": 5
    })
}

pub fn mens_catalog() -> Vec<Value> {
    vec![
        product(101, "Street Hoodie", "hoodie", 6500),
        product(102, "Logo Tee", "tshirt", 2500),
        product(103, "Cargo Pants", "pants", 4200),
    ]
}

pub fn config() -> StorefrontConfig {
    StorefrontConfig::embedded()
        .unwrap()
        .with_endpoint(Some(ENDPOINT.to_string()))
}

pub fn storefront(gateway: Arc<ScriptedGateway>) -> Storefront {
    storefront_with_ref(gateway, None)
}

pub fn storefront_with_ref(gateway: Arc<ScriptedGateway>, query: Option<&str>) -> Storefront {
    let ctx = AppContext::new(config(), gateway, &MemorySessionStore::new(), query).unwrap();
    Storefront::new(ctx)
}
