//! TTL cache.
//!
//! Entries are stamped on insert and treated as absent once their age exceeds
//! the TTL. Expired entries are removed on the next read of that key; there is
//! no background sweep.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;
use tracing::trace;

use crate::clock::{Clock, SystemClock};
use crate::CacheError;

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> Entry<V> {
    /// Still fresh at exactly `ttl` of age.
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) <= ttl
    }
}

/// Concurrent key/value cache with a single fixed TTL.
pub struct TtlCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    /// Create a cache backed by the system clock.
    pub fn new(ttl: Duration) -> Result<Self, CacheError> {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit time source.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }
        Ok(Self {
            entries: DashMap::new(),
            ttl,
            clock,
        })
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, evicting it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        // The read guard must be released before removing.
        let fresh = {
            let entry = self.entries.get(key)?;
            if entry.is_fresh(now, self.ttl) {
                Some(entry.value.clone())
            } else {
                None
            }
        };

        if fresh.is_none() {
            trace!(?key, "cache entry expired");
            self.entries
                .remove_if(key, |_, entry| !entry.is_fresh(now, self.ttl));
        }
        fresh
    }

    /// Store `value`, replacing any previous entry and restarting its TTL.
    pub fn set(&self, key: K, value: V) {
        let entry = Entry {
            value,
            inserted_at: self.clock.now(),
        };
        self.entries.insert(key, entry);
    }

    /// Remove an entry, returning its value if it was still fresh.
    pub fn remove(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .remove(key)
            .filter(|(_, entry)| entry.is_fresh(now, self.ttl))
            .map(|(_, entry)| entry.value)
    }

    /// Whether `key` has a fresh entry. Does not evict.
    pub fn contains(&self, key: &K) -> bool {
        let now = self.clock.now();
        self.entries
            .get(key)
            .map(|entry| entry.is_fresh(now, self.ttl))
            .unwrap_or(false)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualClock;

    const TTL: Duration = Duration::from_secs(300);

    fn cache() -> (TtlCache<String, u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(TTL, clock.clone()).unwrap();
        (cache, clock)
    }

    #[test]
    fn test_get_after_set_within_ttl() {
        let (cache, clock) = cache();
        cache.set("products-mens".into(), 1);
        clock.advance(TTL - Duration::from_millis(1));
        assert_eq!(cache.get(&"products-mens".into()), Some(1));
    }

    #[test]
    fn test_entry_fresh_at_exactly_ttl() {
        let (cache, clock) = cache();
        cache.set("products-mens".into(), 1);

        clock.advance(TTL);
        assert_eq!(cache.get(&"products-mens".into()), Some(1));
        assert!(cache.contains(&"products-mens".into()));

        clock.advance(Duration::from_millis(1));
        assert!(!cache.contains(&"products-mens".into()));
        assert_eq!(cache.get(&"products-mens".into()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let (cache, clock) = cache();
        cache.set("products-mens".into(), 1);
        clock.advance(TTL + Duration::from_millis(1));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"products-mens".into()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_overwrites_and_restarts_ttl() {
        let (cache, clock) = cache();
        cache.set("k".into(), 1);
        clock.advance(Duration::from_secs(200));
        cache.set("k".into(), 2);
        clock.advance(Duration::from_secs(200));
        assert_eq!(cache.get(&"k".into()), Some(2));
    }

    #[test]
    fn test_contains_does_not_evict() {
        let (cache, clock) = cache();
        cache.set("k".into(), 1);
        clock.advance(TTL * 2);
        assert!(!cache.contains(&"k".into()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let (cache, _clock) = cache();
        cache.set("a".into(), 1);
        cache.set("b".into(), 2);
        assert_eq!(cache.remove(&"a".into()), Some(1));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let result: Result<TtlCache<String, u32>, _> = TtlCache::new(Duration::ZERO);
        assert_eq!(result.err(), Some(CacheError::InvalidTtl));
    }
}
