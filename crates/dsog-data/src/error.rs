//! Fetch error types.

use dsog_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog endpoint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Endpoint URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request could not be sent or the connection failed.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Endpoint answered `success: false` or left out `data`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Request failed local validation and was never sent.
    #[error(transparent)]
    Invalid(#[from] CommerceError),
}

impl FetchError {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(_) | FetchError::Transport(_) | FetchError::Timeout => {
                "transport"
            }
            FetchError::Http { .. } => "http",
            FetchError::Parse(_) => "parse",
            FetchError::Rejected(_) => "rejected",
            FetchError::Invalid(_) => "validation",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}
