//! DSOG storefront pipeline.
//!
//! Ties the workspace crates together:
//! - `StorefrontConfig` - shipped defaults, user overlay, environment override
//! - `DataManager` - cached, deduplicated product loading with fallback data
//! - `FranchiseeSession` - referral routing for WhatsApp orders
//! - `AppContext` / `Storefront` - wiring and the operations the `dsog` CLI runs
//!
//! # Example
//!
//! ```rust,ignore
//! use dsog_storefront::{AppContext, MemorySessionStore, Storefront, StorefrontConfig};
//!
//! let config = StorefrontConfig::embedded()?;
//! let ctx = AppContext::connect(config, &MemorySessionStore::new(), Some("?ref=john"))?;
//! let storefront = Storefront::new(ctx);
//!
//! let view = storefront.load_collection("mens").await;
//! println!("{} ({})", view.rendered.cards().len(), view.source);
//! ```

pub mod config;
pub mod context;
pub mod data_manager;
pub mod error;
pub mod session;
pub mod storefront;
pub mod telemetry;

pub use config::StorefrontConfig;
pub use context::AppContext;
pub use data_manager::{CatalogSource, DataManager, FallbackCatalog, LoadedProducts, ProductList};
pub use error::{ConfigError, SessionError, StorefrontError};
pub use session::{FileSessionStore, FranchiseeSession, MemorySessionStore, SessionStore};
pub use storefront::{CollectionView, FeaturedView, Storefront};
