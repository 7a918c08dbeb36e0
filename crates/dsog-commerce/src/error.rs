//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Collection not known to the storefront.
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Franchisee code not present in the directory.
    #[error("Franchisee not found: {0}")]
    FranchiseeNotFound(String),

    /// An order is missing customer name, phone or address.
    #[error("Missing required fields")]
    MissingRequiredFields,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CommerceError {
    /// Whether this error rejects caller input rather than naming a missing entity.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::MissingRequiredFields
                | CommerceError::InvalidQuantity(_)
                | CommerceError::ValidationError(_)
        )
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
