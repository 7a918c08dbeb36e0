//! Storefront domain types and logic for DSOG STORES.
//!
//! This crate has no I/O. It provides:
//!
//! - **Catalog**: products as served by the catalog endpoint, collections,
//!   category filters
//! - **Checkout**: order requests, delivery fees, totals, order numbers,
//!   WhatsApp order messages
//! - **Franchisees**: the referral directory used to route WhatsApp orders
//!
//! # Example
//!
//! ```rust,ignore
//! use dsog_commerce::prelude::*;
//!
//! let order = OrderRequest::new("Jane", "0700000000", "Nairobi")
//!     .with_item(OrderItem::new("Premium Hoodie", Price::new(1000.0), 2))
//!     .with_delivery(DeliveryOption::Express);
//!
//! let totals = order.totals();
//! assert_eq!(totals.total, Price::new(2300.0));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod checkout;
pub mod franchisee;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Price, CURRENCY_LABEL};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Price, CURRENCY_LABEL};

    // Catalog
    pub use crate::catalog::{
        cache_key, capitalize, filter_by_category, CategoryFilter, Page, Product, ProductRecord,
        KNOWN_COLLECTIONS, PLACEHOLDER_IMAGE,
    };

    // Checkout
    pub use crate::checkout::{
        DeliveryOption, OrderConfirmation, OrderContact, OrderItem, OrderNumber, OrderRequest,
        OrderTotals, WhatsAppMessage,
    };

    // Franchisees
    pub use crate::franchisee::{Franchisee, FranchiseeDirectory, FranchiseeRecord};
}
