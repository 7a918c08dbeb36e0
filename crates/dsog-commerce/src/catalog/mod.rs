//! Product catalog module.
//!
//! Contains the product type served by the catalog endpoint, collection
//! helpers and per-collection category filters.

mod collection;
mod filter;
mod product;

pub use collection::{cache_key, capitalize, Page, KNOWN_COLLECTIONS};
pub use filter::{filter_by_category, CategoryFilter};
pub use product::{Product, ProductRecord, PLACEHOLDER_IMAGE};
