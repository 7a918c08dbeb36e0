//! Category filters shown above a collection grid.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// A category filter button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// Category id matched against product categories, or `all`.
    pub id: String,
    /// Button label.
    pub name: String,
}

impl CategoryFilter {
    /// Filter id that keeps every product.
    pub const ALL: &'static str = "all";

    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether this is the catch-all filter.
    pub fn is_all(&self) -> bool {
        self.id == Self::ALL
    }

    /// Apply this filter to a product list.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        filter_by_category(products, &self.id)
    }
}

/// Keep products whose category matches `category` (case-insensitive).
///
/// `all` keeps everything.
pub fn filter_by_category(products: &[Product], category: &str) -> Vec<Product> {
    if category == CategoryFilter::ALL {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| p.is_in_category(category))
        .cloned()
        .collect()
}
