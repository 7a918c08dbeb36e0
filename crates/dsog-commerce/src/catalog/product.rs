//! Product types.
//!
//! [`ProductRecord`] mirrors the JSON the catalog endpoint emits (and the
//! shape used for fallback data in configuration). [`Product`] is the
//! normalized, read-only form the rest of the storefront works with.

use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// Neutral 400x300 image shown when a product has no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='400' height='300' viewBox='0 0 400 300'%3E%3Crect width='400' height='300' fill='%23f8f8f8'/%3E%3C/svg%3E";

/// A product exactly as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Base price. Older feeds call this `price`.
    #[serde(default, alias = "price")]
    pub base_price: Price,
    /// Category label (e.g., "hoodie").
    #[serde(default)]
    pub category: Option<String>,
    /// Collection the product belongs to.
    #[serde(default, alias = "collection")]
    pub collection_name: Option<String>,
    /// Image URLs, primary first.
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// Legacy single-image field.
    #[serde(default)]
    pub image: Option<String>,
    /// Featured flag.
    #[serde(default)]
    pub is_featured: bool,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
}

/// A catalog product.
///
/// Always carries at least one image URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: Option<String>,
    /// Base price as reported by the backend.
    pub base_price: Price,
    /// Category label.
    pub category: Option<String>,
    /// Collection label.
    pub collection: Option<String>,
    images: Vec<String>,
    /// Featured flag.
    pub featured: bool,
    /// Units in stock.
    pub stock: i64,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let mut images: Vec<String> = record
            .images
            .unwrap_or_default()
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();

        if images.is_empty() {
            let legacy = record.image.filter(|url| !url.trim().is_empty());
            images.push(legacy.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()));
        }

        Self {
            id: record.id,
            name: record.name,
            description: record.description.filter(|d| !d.trim().is_empty()),
            base_price: record.base_price,
            category: record.category.filter(|c| !c.trim().is_empty()),
            collection: record.collection_name.filter(|c| !c.trim().is_empty()),
            images,
            featured: record.is_featured,
            stock: record.stock,
        }
    }
}

impl Product {
    /// Create a product with a single image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, base_price: Price) -> Self {
        Self::from(ProductRecord {
            id: id.into(),
            name: name.into(),
            description: None,
            base_price,
            category: None,
            collection_name: None,
            images: None,
            image: None,
            is_featured: false,
            stock: 0,
        })
    }

    /// Replace the image list. An empty list falls back to the placeholder.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        let images: Vec<String> = images.into_iter().filter(|u| !u.trim().is_empty()).collect();
        self.images = if images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            images
        };
        self
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Tag with a collection label.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Image URLs, primary first. Never empty.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// The primary image URL.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Whether the product has more than one image.
    pub fn has_gallery(&self) -> bool {
        self.images.len() > 1
    }

    /// Check if any units are in stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive category match.
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .map(|c| c.eq_ignore_ascii_case(category))
            .unwrap_or(false)
    }
}
