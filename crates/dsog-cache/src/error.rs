//! Cache error types.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when using the cache or waiting on a shared fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A zero TTL would expire every entry on insert.
    #[error("TTL must be greater than zero")]
    InvalidTtl,

    /// Waiting for another task's fetch took too long.
    #[error("timed out after {0:?} waiting for in-flight fetch")]
    Timeout(Duration),

    /// The fetching task settled with a failure.
    #[error("in-flight fetch failed: {0}")]
    LeaderFailed(String),

    /// The fetching task went away without settling.
    #[error("in-flight fetch was abandoned")]
    Abandoned,
}
