//! Product detail modal.
//!
//! ```text
//!            open(p)                 select(i) / next / previous
//!  Closed ───────────▶ Open{index, zoomed} ◀──────────────┐
//!    ▲                     │   │                           │
//!    └──── close/Escape ───┘   └───────────────────────────┘
//! ```
//!
//! Changing image always resets zoom. Closing resets everything and
//! releases the page scroll lock.

use dsog_commerce::catalog::Product;
use serde::Serialize;
use tracing::debug;

use crate::card::OrderAction;

const DEFAULT_DESCRIPTION: &str =
    "Premium quality product from DSOG STORES. Crafted with attention to detail.";

/// Keys the modal reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl From<&str> for ModalKey {
    fn from(key: &str) -> Self {
        match key {
            "ArrowLeft" => ModalKey::ArrowLeft,
            "ArrowRight" => ModalKey::ArrowRight,
            "Escape" => ModalKey::Escape,
            _ => ModalKey::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OpenState {
    product: Product,
    label: Option<String>,
    index: usize,
    zoomed: bool,
}

/// Gallery thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub index: usize,
    pub src: String,
    pub alt: String,
    pub active: bool,
}

/// What an open modal shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub title: String,
    pub price_label: String,
    pub badge: String,
    pub description: String,
    pub primary_image: String,
    /// Empty when the product has a single image.
    pub thumbnails: Vec<Thumbnail>,
    pub zoomed: bool,
    pub zoom_hint: &'static str,
    pub order: OrderAction,
}

/// Product detail modal state.
#[derive(Debug, Default)]
pub struct Modal {
    state: Option<OpenState>,
    scroll_locked: bool,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `product` at its first image, unzoomed, and lock page scroll.
    pub fn open(&mut self, product: Product, label: Option<&str>) {
        debug!(product = %product.id, images = product.images().len(), "modal opened");
        self.state = Some(OpenState {
            product,
            label: label.map(str::to_string),
            index: 0,
            zoomed: false,
        });
        self.scroll_locked = true;
    }

    pub fn close(&mut self) {
        if self.state.take().is_some() {
            debug!("modal closed");
        }
        self.scroll_locked = false;
    }

    /// Tear down. The modal is left closed.
    pub fn destroy(&mut self) {
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn product(&self) -> Option<&Product> {
        self.state.as_ref().map(|s| &s.product)
    }

    /// Zero-based index of the image on display. 0 when closed.
    pub fn active_index(&self) -> usize {
        self.state.as_ref().map(|s| s.index).unwrap_or(0)
    }

    pub fn is_zoomed(&self) -> bool {
        self.state.as_ref().map(|s| s.zoomed).unwrap_or(false)
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Switch to thumbnail `index`. Out-of-range indexes are ignored.
    /// Returns whether the image changed.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if index >= state.product.images().len() {
            return false;
        }
        state.index = index;
        state.zoomed = false;
        true
    }

    pub fn next(&mut self) -> bool {
        let index = self.active_index() + 1;
        self.select(index)
    }

    pub fn previous(&mut self) -> bool {
        match self.active_index().checked_sub(1) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Click on the primary image.
    pub fn toggle_zoom(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.zoomed = !state.zoomed;
        }
    }

    /// Click anywhere outside the image area.
    pub fn click_outside_image(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.zoomed = false;
        }
    }

    /// Keyboard input. Ignored while closed.
    pub fn key(&mut self, key: ModalKey) {
        if !self.is_open() {
            return;
        }
        match key {
            ModalKey::ArrowLeft => {
                self.previous();
            }
            ModalKey::ArrowRight => {
                self.next();
            }
            ModalKey::Escape => self.close(),
            ModalKey::Other => {}
        }
    }

    /// Current view, or `None` when closed.
    pub fn view(&self) -> Option<ModalView> {
        let state = self.state.as_ref()?;
        let product = &state.product;
        let images = product.images();

        let thumbnails = if product.has_gallery() {
            images
                .iter()
                .enumerate()
                .map(|(index, src)| Thumbnail {
                    index,
                    src: src.clone(),
                    alt: format!("{} - View {}", product.name, index + 1),
                    active: index == state.index,
                })
                .collect()
        } else {
            Vec::new()
        };

        let label = state.label.as_deref();
        Some(ModalView {
            title: product.name.clone(),
            price_label: product.base_price.display(),
            badge: label
                .or(product.category.as_deref())
                .unwrap_or("Premium")
                .to_string(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            primary_image: images
                .get(state.index)
                .cloned()
                .unwrap_or_else(|| product.primary_image().to_string()),
            thumbnails,
            zoomed: state.zoomed,
            zoom_hint: if state.zoomed {
                "Click to zoom out"
            } else {
                "Click to zoom"
            },
            order: OrderAction::for_product(product, label),
        })
    }
}
