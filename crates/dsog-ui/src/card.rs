//! Product card view model.

use dsog_commerce::catalog::{Product, PLACEHOLDER_IMAGE};
use dsog_commerce::Price;
use serde::Serialize;

/// When a card image should load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LoadStrategy {
    /// Wait until the image is within `root_margin_px` of the viewport and
    /// at least `threshold` of it would be visible.
    Deferred { root_margin_px: u32, threshold: f32 },
    /// No visibility observer available; load straight away.
    Eager,
}

/// Lazily loaded image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LazyImage {
    /// Real image URL.
    pub src: String,
    /// Shown until `src` loads.
    pub placeholder: String,
    pub alt: String,
    pub strategy: LoadStrategy,
}

impl LazyImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>, strategy: LoadStrategy) -> Self {
        Self {
            src: src.into(),
            placeholder: PLACEHOLDER_IMAGE.to_string(),
            alt: alt.into(),
            strategy,
        }
    }

    /// Whether the real image is requested without waiting for visibility.
    pub fn loads_immediately(&self) -> bool {
        matches!(self.strategy, LoadStrategy::Eager)
    }

    /// Whether the image should start loading, for an image spanning
    /// `top..top + height` pixels relative to the top of a viewport
    /// `viewport_height` pixels tall.
    pub fn should_load(&self, top: i64, height: u32, viewport_height: u32) -> bool {
        let LoadStrategy::Deferred {
            root_margin_px,
            threshold,
        } = self.strategy
        else {
            return true;
        };

        let margin = i64::from(root_margin_px);
        let root_start = -margin;
        let root_end = i64::from(viewport_height) + margin;
        let bottom = top + i64::from(height);

        let overlap = bottom.min(root_end) - top.max(root_start);
        if height == 0 {
            return top >= root_start && top <= root_end;
        }
        if overlap <= 0 {
            return false;
        }
        overlap as f32 / height as f32 >= threshold
    }

    /// URL to display right now.
    pub fn current_src(&self, loaded: bool) -> &str {
        if loaded || self.loads_immediately() {
            &self.src
        } else {
            &self.placeholder
        }
    }
}

/// The "Order via WhatsApp" payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderAction {
    pub product_name: String,
    pub price: Price,
    pub collection: String,
}

impl OrderAction {
    /// Collection falls back to the product's own, then `general`.
    pub fn for_product(product: &Product, label: Option<&str>) -> Self {
        let collection = label
            .or(product.collection.as_deref())
            .unwrap_or("general")
            .to_string();
        Self {
            product_name: product.name.clone(),
            price: product.base_price,
            collection,
        }
    }
}

/// Where on a card the user clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    OrderButton,
    Body,
}

/// What a card click asks the application to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CardIntent {
    OpenModal {
        product: Product,
        label: Option<String>,
    },
    OrderViaWhatsApp(OrderAction),
}

/// One product card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub product_id: String,
    pub title: String,
    pub badge: String,
    pub price_label: String,
    pub description: String,
    pub image: LazyImage,
    pub order: OrderAction,
    #[serde(skip)]
    product: Product,
    #[serde(skip)]
    label: Option<String>,
}

impl ProductCard {
    pub(crate) fn build(
        product: &Product,
        label: Option<&str>,
        default_description: &str,
        strategy: LoadStrategy,
    ) -> Self {
        let badge = label
            .or(product.category.as_deref())
            .unwrap_or("New")
            .to_string();
        let description = product
            .description
            .clone()
            .unwrap_or_else(|| default_description.to_string());

        Self {
            product_id: product.id.to_string(),
            title: product.name.clone(),
            badge,
            price_label: product.base_price.display(),
            description,
            image: LazyImage::new(product.primary_image(), product.name.clone(), strategy),
            order: OrderAction::for_product(product, label),
            product: product.clone(),
            label: label.map(str::to_string),
        }
    }

    /// Product behind this card.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Resolve a click. The order button orders; anywhere else opens the modal.
    pub fn click(&self, target: CardTarget) -> CardIntent {
        match target {
            CardTarget::OrderButton => CardIntent::OrderViaWhatsApp(self.order.clone()),
            CardTarget::Body => CardIntent::OpenModal {
                product: self.product.clone(),
                label: self.label.clone(),
            },
        }
    }
}
