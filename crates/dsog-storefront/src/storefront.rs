//! Storefront operations.

use std::sync::Arc;

use dsog_commerce::catalog::{filter_by_category, Page, Product};
use dsog_commerce::checkout::{OrderRequest, WhatsAppMessage};
use dsog_commerce::Price;
use dsog_data::{Category, FetchError, OrderResponse, Settings};
use dsog_ui::{CardIntent, Modal, OrderAction, Rendered};
use futures::future::join_all;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::data_manager::{CatalogSource, LoadedProducts};

const NO_PRODUCTS_IN_CATEGORY: &str = "No products found in this category";
const FEATURED_FAILED: &str = "Failed to load featured products";
const BROWSE_COLLECTIONS: &str = "Browse Collections";

/// A rendered product list and where its data came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionView {
    pub collection: String,
    pub source: CatalogSource,
    pub rendered: Rendered,
}

/// Rendered featured products.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedView {
    /// Source per featured collection, in configured order.
    pub sources: Vec<(String, CatalogSource)>,
    pub rendered: Rendered,
}

/// Storefront facade over an [`AppContext`]. Cheap to clone.
#[derive(Clone)]
pub struct Storefront {
    ctx: Arc<AppContext>,
}

impl Storefront {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Products of `collection`, rendered under the collection's label.
    pub async fn load_collection(&self, collection: &str) -> CollectionView {
        let LoadedProducts { products, source } = self.ctx.data.get_products(collection).await;
        CollectionView {
            collection: collection.to_string(),
            source,
            rendered: self.ctx.renderer.render_products(&products, Some(collection)),
        }
    }

    /// Products of `collection` narrowed to `category` (`all` keeps every product).
    pub async fn load_filtered(&self, collection: &str, category: &str) -> CollectionView {
        let LoadedProducts { products, source } = self.ctx.data.get_products(collection).await;
        let filtered = filter_by_category(&products, category);
        debug!(
            collection,
            category,
            total = products.len(),
            matched = filtered.len(),
            "category filter applied"
        );

        let rendered = if filtered.is_empty() {
            self.ctx.renderer.empty(NO_PRODUCTS_IN_CATEGORY)
        } else {
            self.ctx.renderer.render_products(&filtered, Some(collection))
        };
        CollectionView {
            collection: collection.to_string(),
            source,
            rendered,
        }
    }

    /// The first few products of each featured collection, loaded together.
    pub async fn featured(&self) -> FeaturedView {
        let settings = &self.ctx.config.render;
        let loads = settings
            .featured_collections
            .iter()
            .map(|collection| async move {
                (collection.clone(), self.ctx.data.get_products(collection).await)
            });
        let results = join_all(loads).await;

        let mut sources = Vec::with_capacity(results.len());
        let mut featured: Vec<Product> = Vec::new();
        for (collection, loaded) in results {
            featured.extend(
                loaded
                    .products
                    .iter()
                    .take(settings.featured_per_collection)
                    .map(|p| p.clone().with_collection(collection.as_str())),
            );
            sources.push((collection, loaded.source));
        }
        featured.truncate(settings.featured_limit);

        let rendered = if featured.is_empty() {
            warn!("no featured products available");
            self.ctx
                .renderer
                .with_contact(FEATURED_FAILED, BROWSE_COLLECTIONS)
        } else {
            self.ctx.renderer.render_products(&featured, None)
        };
        FeaturedView { sources, rendered }
    }

    /// WhatsApp message ordering one product, routed through the active
    /// franchisee when there is one.
    pub fn whatsapp_order(
        &self,
        product_name: &str,
        price: Price,
        collection: &str,
    ) -> WhatsAppMessage {
        let contact = self.ctx.session.contact(self.ctx.config.main_line());
        let message = WhatsAppMessage::product_order(&contact, product_name, price, collection);
        info!(
            product = product_name,
            number = %message.number,
            franchisee = contact.franchisee().is_some(),
            "whatsapp order prepared"
        );
        message
    }

    /// WhatsApp message for a card or modal order button.
    pub fn order_action(&self, action: &OrderAction) -> WhatsAppMessage {
        self.whatsapp_order(&action.product_name, action.price, &action.collection)
    }

    /// Carry out a card click: open the modal, or prepare a WhatsApp order.
    pub fn handle_intent(
        &self,
        intent: CardIntent,
        modal: &mut Modal,
    ) -> Option<WhatsAppMessage> {
        match intent {
            CardIntent::OpenModal { product, label } => {
                modal.open(product, label.as_deref());
                None
            }
            CardIntent::OrderViaWhatsApp(action) => Some(self.order_action(&action)),
        }
    }

    /// Warm the collections configured for `page` in background tasks,
    /// each after the configured delay. Must be called inside a tokio runtime.
    pub fn preload(&self, page: &Page) -> Vec<JoinHandle<CatalogSource>> {
        let delay = self.ctx.config.preload_delay();
        self.ctx
            .config
            .preload_for(page)
            .iter()
            .map(|collection| {
                let data = Arc::clone(&self.ctx.data);
                let collection = collection.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let loaded = data.get_products(&collection).await;
                    debug!(collection = %collection, source = %loaded.source, "collection preloaded");
                    loaded.source
                })
            })
            .collect()
    }

    pub async fn settings(&self) -> Result<Settings, FetchError> {
        self.ctx.data.client().settings().await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.ctx.data.client().categories().await
    }

    /// Submit an order, tagged with the active franchisee. Failures come
    /// back as `{success: false, error}`.
    pub async fn submit_order(&self, mut order: OrderRequest) -> OrderResponse {
        if order.franchisee_id.is_none() {
            if let (Some(code), Some(franchisee)) =
                (self.ctx.session.code(), self.ctx.session.current())
            {
                order = order.with_franchisee(code.clone(), franchisee);
            }
        }

        match self.ctx.data.client().submit_order(&order).await {
            Ok(confirmation) => OrderResponse::from(confirmation),
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "order not accepted");
                OrderResponse::failure(failure_message(e))
            }
        }
    }

    /// Empty the product cache.
    pub fn clear_cache(&self) {
        self.ctx.data.clear_cache();
    }
}

fn failure_message(error: FetchError) -> String {
    match error {
        FetchError::Rejected(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message(FetchError::Rejected("Out of stock".into())),
            "Out of stock"
        );
        assert_eq!(
            failure_message(FetchError::Invalid(
                dsog_commerce::CommerceError::MissingRequiredFields
            )),
            "Missing required fields"
        );
    }
}
