//! Catalog endpoint client.
//!
//! The endpoint multiplexes every call over one URL with an `action` query
//! parameter:
//!
//! | action          | method | payload                         |
//! |-----------------|--------|---------------------------------|
//! | `getProducts`   | GET    | `collection`, `timestamp` query |
//! | `getSettings`   | GET    |                                 |
//! | `getCategories` | GET    |                                 |
//! | `submitOrder`   | POST   | JSON [`OrderRequest`]           |

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use dsog_commerce::catalog::{Product, ProductRecord};
use dsog_commerce::checkout::{OrderConfirmation, OrderRequest};
use dsog_commerce::CategoryId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::{ApiEnvelope, FetchError, Gateway, OrderResponse};

/// Key/value store settings as returned by `getSettings`.
pub type Settings = BTreeMap<String, serde_json::Value>;

/// A category row from `getCategories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Remaining columns, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Typed access to the catalog endpoint.
#[derive(Clone)]
pub struct CatalogClient {
    gateway: Arc<dyn Gateway>,
    endpoint: Url,
}

impl CatalogClient {
    pub fn new(gateway: Arc<dyn Gateway>, endpoint: &str) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self { gateway, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint URL with `action` and any extra query pairs appended.
    pub fn action_url(&self, action: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    /// Catalog URL for one collection. The timestamp defeats intermediary caches.
    pub fn products_url(&self, collection: &str) -> Url {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        self.action_url(
            "getProducts",
            &[("collection", collection), ("timestamp", &timestamp)],
        )
    }

    /// Fetch the products in `collection`.
    #[instrument(skip(self))]
    pub async fn products(&self, collection: &str) -> Result<Vec<Product>, FetchError> {
        let started = Instant::now();
        let url = self.products_url(collection);
        let records: Vec<ProductRecord> = self.get_data(&url).await?;
        let products: Vec<Product> = records.into_iter().map(Product::from).collect();
        debug!(
            count = products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "products fetched"
        );
        Ok(products)
    }

    /// Fetch store settings.
    pub async fn settings(&self) -> Result<Settings, FetchError> {
        let url = self.action_url("getSettings", &[]);
        self.get_data(&url).await
    }

    /// Fetch active categories in display order.
    pub async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        let url = self.action_url("getCategories", &[]);
        self.get_data(&url).await
    }

    /// Validate and submit an order.
    ///
    /// Requests missing customer fields fail with [`FetchError::Invalid`]
    /// before anything is sent.
    pub async fn submit_order(
        &self,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, FetchError> {
        order.validate()?;

        let url = self.action_url("submitOrder", &[]);
        let body = serde_json::to_value(order)?;
        let response = self.gateway.post_json(&url, &body).await?.error_for_status()?;
        let reply: OrderResponse = response.json()?;
        let confirmation = reply.into_confirmation()?;

        info!(order_number = %confirmation.order_number, "order submitted");
        Ok(confirmation)
    }

    async fn get_data<T>(&self, url: &Url) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.gateway.get(url).await?.error_for_status()?;
        let envelope: ApiEnvelope<T> = response.json()?;
        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;
    use async_trait::async_trait;
    use dsog_commerce::checkout::OrderItem;
    use dsog_commerce::{CommerceError, Price};
    use serde_json::json;
    use std::sync::Mutex;

    const ENDPOINT: &str = "https://example.test/exec";

    /// Returns one canned response and remembers every request.
    struct StubGateway {
        reply: Response,
        seen: Mutex<Vec<(String, Option<serde_json::Value>)>>,
    }

    impl StubGateway {
        fn new(reply: Response) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(String, Option<serde_json::Value>)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Gateway for StubGateway {
        async fn get(&self, url: &Url) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push((url.to_string(), None));
            Ok(self.reply.clone())
        }

        async fn post_json(
            &self,
            url: &Url,
            body: &serde_json::Value,
        ) -> Result<Response, FetchError> {
            self.seen
                .lock()
                .unwrap()
                .push((url.to_string(), Some(body.clone())));
            Ok(self.reply.clone())
        }
    }

    fn client(gateway: Arc<StubGateway>) -> CatalogClient {
        CatalogClient::new(gateway, ENDPOINT).unwrap()
    }

    #[test]
    fn test_products_url_query() {
        let client = client(StubGateway::new(Response::json_ok(&json!({}))));
        let url = client.products_url("mens");
        let pairs: BTreeMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs["action"], "getProducts");
        assert_eq!(pairs["collection"], "mens");
        assert!(pairs["timestamp"].parse::<i64>().is_ok());
        assert!(url.as_str().starts_with(ENDPOINT));
    }

    #[test]
    fn test_invalid_endpoint() {
        let gateway = StubGateway::new(Response::json_ok(&json!({})));
        let result = CatalogClient::new(gateway, "not a url");
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_products_parses_envelope() {
        let gateway = StubGateway::new(Response::json_ok(&json!({
            "success": true,
            "data": [
                {"id": 1, "name": "Premium Hoodie", "basePrice": 8999, "images": ["a.jpg"]},
                {"id": "2", "name": "Designer T-Shirt", "basePrice": 4550, "image": "b.jpg"}
            ]
        })));
        let products = client(gateway).products("mens").await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_str(), "1");
        assert_eq!(products[1].primary_image(), "b.jpg");
    }

    #[tokio::test]
    async fn test_products_http_error() {
        let gateway = StubGateway::new(Response::new(500, Default::default(), b"boom".to_vec()));
        let err = client(gateway).products("mens").await.unwrap_err();
        assert_eq!(err.kind(), "http");
    }

    #[tokio::test]
    async fn test_products_malformed_body() {
        let gateway = StubGateway::new(Response::new(200, Default::default(), b"<html>".to_vec()));
        let err = client(gateway).products("mens").await.unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn test_settings() {
        let gateway = StubGateway::new(Response::json_ok(&json!({
            "success": true,
            "data": {"store_name": "DSOG STORES", "currency": "KSh"}
        })));
        let settings = client(gateway).settings().await.unwrap();
        assert_eq!(settings["store_name"], "DSOG STORES");
    }

    #[tokio::test]
    async fn test_categories_keep_extra_columns() {
        let gateway = StubGateway::new(Response::json_ok(&json!({
            "success": true,
            "data": [{"id": 3, "name": "Hoodies", "slug": "hoodie", "display_order": 1}]
        })));
        let categories = client(gateway).categories().await.unwrap();
        assert_eq!(categories[0].slug.as_deref(), Some("hoodie"));
        assert_eq!(categories[0].extra["display_order"], 1);
    }

    #[tokio::test]
    async fn test_submit_order_posts_body() {
        let gateway = StubGateway::new(Response::json_ok(&json!({
            "success": true, "orderNumber": "DSOG-20261019-ABC123", "orderId": "9"
        })));
        let order = OrderRequest::new("Jane", "0700", "Nairobi")
            .with_item(OrderItem::new("Hoodie", Price::new(1000.0), 2));

        let confirmation = client(gateway.clone()).submit_order(&order).await.unwrap();
        assert_eq!(confirmation.order_id.as_str(), "9");

        let requests = gateway.requests();
        assert!(requests[0].0.ends_with("action=submitOrder"));
        assert_eq!(requests[0].1.as_ref().unwrap()["customerName"], "Jane");
    }

    #[tokio::test]
    async fn test_submit_order_validates_before_sending() {
        let gateway = StubGateway::new(Response::json_ok(&json!({"success": true})));
        let order = OrderRequest {
            customer_name: Some("Jane".into()),
            ..OrderRequest::default()
        };

        let err = client(gateway.clone()).submit_order(&order).await.unwrap_err();
        assert_eq!(err, FetchError::Invalid(CommerceError::MissingRequiredFields));
        assert_eq!(err.to_string(), "Missing required fields");
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_order_server_rejection() {
        let gateway = StubGateway::new(Response::json_ok(&json!({
            "success": false, "error": "Invalid action"
        })));
        let order = OrderRequest::new("Jane", "0700", "Nairobi");
        let err = client(gateway).submit_order(&order).await.unwrap_err();
        assert_eq!(err, FetchError::Rejected("Invalid action".into()));
    }
}
