//! Newtype IDs for type-safe identifiers.
//!
//! The backend emits database ids either as JSON strings or as numbers
//! depending on the driver, so every id deserializes from both and is
//! kept as a string afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire representation accepted for any id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

fn deserialize_raw_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
    })
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(#[serde(deserialize_with = "deserialize_raw_id")] String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);
define_id!(FranchiseeCode);
define_id!(CategoryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_json_string_or_number() {
        let text: ProductId = serde_json::from_str("\"42\"").unwrap();
        let number: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(text, number);
        assert_eq!(number.as_str(), "42");
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = OrderId::new("17");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"17\"");
    }

    #[test]
    fn test_id_display() {
        let id = FranchiseeCode::new("john");
        assert_eq!(format!("{}", id), "john");
    }
}
