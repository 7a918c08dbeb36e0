//! In-memory caching for the DSOG storefront.
//!
//! This crate provides:
//! - `TtlCache` - key/value store whose entries expire after a fixed duration
//! - `InFlight` - registry of keys currently being fetched, so concurrent
//!   requests for one key share a single fetch
//! - `Clock` - time source, swappable in tests
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use dsog_cache::{Claim, InFlight, TtlCache};
//!
//! let cache: TtlCache<String, Vec<u8>> = TtlCache::new(Duration::from_secs(300))?;
//! let inflight: InFlight<String, Vec<u8>> = InFlight::new();
//!
//! match inflight.claim("products-mens".to_string()) {
//!     Claim::Leader(guard) => {
//!         let body = fetch().await;
//!         cache.set("products-mens".to_string(), body.clone());
//!         guard.complete(body);
//!     }
//!     Claim::Follower(waiter) => {
//!         let body = waiter.wait(Duration::from_secs(10)).await?;
//!     }
//! }
//! ```

mod clock;
mod error;
mod inflight;
mod ttl;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CacheError;
pub use inflight::{Claim, InFlight, LeaderGuard, Settled, Waiter};
pub use ttl::TtlCache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CacheError, Claim, Clock, InFlight, TtlCache};
}
