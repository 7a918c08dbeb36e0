//! Product list rendering.

use dsog_commerce::catalog::Product;
use serde::Serialize;
use tracing::debug;

use crate::card::{LoadStrategy, ProductCard};

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderConfig {
    /// Most cards shown for one list.
    pub max_cards: usize,
    /// Lazy-load margin around the viewport, in pixels.
    pub lazy_margin_px: u32,
    /// Visible fraction that triggers a lazy load.
    pub lazy_threshold: f32,
    /// Placeholder cards shown while loading.
    pub skeleton_cards: usize,
    /// Description used when a product has none.
    pub default_description: String,
    /// Number behind "Request Products" in the empty state.
    pub contact_number: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_cards: 20,
            lazy_margin_px: 200,
            lazy_threshold: 0.1,
            skeleton_cards: 6,
            default_description: "Premium quality product from DSOG STORES.".to_string(),
            contact_number: "254733737983".to_string(),
        }
    }
}

/// A call-to-action that opens a WhatsApp chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAction {
    pub label: String,
    pub link: String,
}

/// Output of rendering a product list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Rendered {
    /// Placeholder grid shown while a fetch is outstanding.
    Loading { placeholders: usize },
    /// Nothing to show.
    Empty {
        message: String,
        action: ContactAction,
    },
    Cards { cards: Vec<ProductCard> },
    /// Loading failed; the caller may retry.
    Failed { message: String, retry: bool },
}

impl Rendered {
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Rendered::Cards { cards } => cards,
            _ => &[],
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, Rendered::Empty { .. })
    }
}

/// Turns products into view models.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    observer_available: bool,
}

impl Renderer {
    /// Renderer for an environment that can observe element visibility.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            observer_available: true,
        }
    }

    /// Renderer for an environment without a visibility observer. Images
    /// load immediately.
    pub fn without_observer(config: RenderConfig) -> Self {
        Self {
            config,
            observer_available: false,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn load_strategy(&self) -> LoadStrategy {
        if self.observer_available {
            LoadStrategy::Deferred {
                root_margin_px: self.config.lazy_margin_px,
                threshold: self.config.lazy_threshold,
            }
        } else {
            LoadStrategy::Eager
        }
    }

    /// Render up to `max_cards` products. An empty list renders the empty
    /// state, never a card.
    pub fn render_products(&self, products: &[Product], label: Option<&str>) -> Rendered {
        if products.is_empty() {
            return self.empty("No products found");
        }

        let strategy = self.load_strategy();
        let cards: Vec<ProductCard> = products
            .iter()
            .take(self.config.max_cards)
            .map(|p| ProductCard::build(p, label, &self.config.default_description, strategy))
            .collect();

        debug!(
            total = products.len(),
            shown = cards.len(),
            label = label.unwrap_or(""),
            "rendered product cards"
        );
        Rendered::Cards { cards }
    }

    /// Skeleton grid.
    pub fn loading(&self) -> Rendered {
        Rendered::Loading {
            placeholders: self.config.skeleton_cards,
        }
    }

    /// Empty state with a "Request Products" contact button.
    pub fn empty(&self, message: impl Into<String>) -> Rendered {
        self.with_contact(message, "Request Products")
    }

    /// Nothing could be shown; the shopper is pointed at the main line
    /// through a button labelled `label`.
    pub fn with_contact(&self, message: impl Into<String>, label: impl Into<String>) -> Rendered {
        Rendered::Empty {
            message: message.into(),
            action: ContactAction {
                label: label.into(),
                link: format!("https://wa.me/{}", self.config.contact_number),
            },
        }
    }

    /// Failure state offering a retry.
    pub fn failed(&self, message: impl Into<String>) -> Rendered {
        Rendered::Failed {
            message: message.into(),
            retry: true,
        }
    }
}
