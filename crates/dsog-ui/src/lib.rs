//! View models for the DSOG storefront.
//!
//! Nothing here touches a DOM. Products go in, plain data comes out:
//! - `Renderer` - product list to cards, empty, loading and failure states
//! - `LazyImage` - deferred image loading descriptor
//! - `Modal` - product detail state machine with gallery and zoom
//! - `html` - HTML rendering of the view models
//!
//! # Example
//!
//! ```ignore
//! use dsog_ui::{CardTarget, RenderConfig, Rendered, Renderer};
//!
//! let renderer = Renderer::new(RenderConfig::default());
//! if let Rendered::Cards { cards } = renderer.render_products(&products, Some("mens")) {
//!     let intent = cards[0].click(CardTarget::Body);
//! }
//! ```

mod card;
pub mod html;
mod modal;
mod render;

pub use card::{CardIntent, CardTarget, LazyImage, LoadStrategy, OrderAction, ProductCard};
pub use modal::{Modal, ModalKey, ModalView, Thumbnail};
pub use render::{ContactAction, RenderConfig, Rendered, Renderer};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CardIntent, CardTarget, Modal, ModalKey, RenderConfig, Rendered, Renderer};
}
