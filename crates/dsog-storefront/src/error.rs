//! Storefront error types.

use std::path::PathBuf;
use std::sync::PoisonError;
use thiserror::Error;

/// Errors raised while loading or checking storefront configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ConfigError::Invalid(msg.into())
    }
}

/// Errors from the franchisee session store.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session store lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for SessionError {
    fn from(_: PoisonError<T>) -> Self {
        SessionError::Poisoned
    }
}

/// Errors building the storefront pipeline.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] dsog_data::FetchError),

    #[error(transparent)]
    Cache(#[from] dsog_cache::CacheError),
}
