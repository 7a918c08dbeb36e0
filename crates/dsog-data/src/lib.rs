//! Data access for the DSOG storefront.
//!
//! This crate provides:
//! - `Gateway` - the seam every outbound request goes through
//! - `HttpGateway` - `reqwest` implementation of `Gateway`
//! - `CatalogClient` - typed calls to the catalog endpoint (products,
//!   settings, categories, order submission)
//! - `FetchError` - transport, HTTP, parse and rejection failures
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use dsog_data::{CatalogClient, HttpGateway};
//!
//! let gateway = Arc::new(HttpGateway::new(Duration::from_secs(15))?);
//! let client = CatalogClient::new(gateway, "https://script.google.com/macros/s/.../exec")?;
//!
//! let products = client.products("mens").await?;
//! ```

mod client;
mod envelope;
mod error;
mod gateway;
mod response;

pub use client::{CatalogClient, Category, Settings};
pub use envelope::{ApiEnvelope, OrderResponse};
pub use error::FetchError;
pub use gateway::{Gateway, HttpGateway};
pub use response::Response;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogClient, FetchError, Gateway, HttpGateway, Response};
}
