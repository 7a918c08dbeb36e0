//! In-flight fetch deduplication.
//!
//! The first caller to [`InFlight::claim`] a key becomes the leader and is
//! expected to fetch. Later callers for the same key get a [`Waiter`] that
//! resolves when the leader settles. The key is removed exactly once: when
//! the leader completes, fails, or is dropped.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::CacheError;

/// Final outcome of a fetch, broadcast to every waiter.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<V> {
    Ready(V),
    Failed(String),
}

type Slot<V> = Arc<watch::Sender<Option<Settled<V>>>>;

/// Registry of keys currently being fetched.
pub struct InFlight<K, V> {
    pending: Arc<DashMap<K, Slot<V>>>,
}

/// Result of claiming a key.
pub enum Claim<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Nobody was fetching this key; the caller must fetch and settle.
    Leader(LeaderGuard<K, V>),
    /// Another task is fetching; wait for its outcome.
    Follower(Waiter<V>),
}

impl<K, V> InFlight<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Become the leader for `key`, or follow the existing leader.
    pub fn claim(&self, key: K) -> Claim<K, V> {
        match self.pending.entry(key.clone()) {
            Entry::Occupied(entry) => {
                debug!(?key, "joining in-flight fetch");
                Claim::Follower(Waiter {
                    rx: entry.get().subscribe(),
                })
            }
            Entry::Vacant(entry) => {
                let (tx, _) = watch::channel(None);
                let slot = Arc::new(tx);
                entry.insert(slot.clone());
                Claim::Leader(LeaderGuard {
                    key,
                    slot,
                    pending: self.pending.clone(),
                    settled: false,
                })
            }
        }
    }

    /// Whether a fetch for `key` is outstanding.
    pub fn is_loading(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Number of outstanding fetches.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K, V> Default for InFlight<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Held by the task doing the fetch. Settling, or dropping the guard,
/// clears the in-flight mark.
pub struct LeaderGuard<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    key: K,
    slot: Slot<V>,
    pending: Arc<DashMap<K, Slot<V>>>,
    settled: bool,
}

impl<K, V> LeaderGuard<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Publish a successful result to all waiters.
    pub fn complete(mut self, value: V) {
        self.settle(Settled::Ready(value));
    }

    /// Publish a failure to all waiters.
    pub fn fail(mut self, reason: impl Into<String>) {
        self.settle(Settled::Failed(reason.into()));
    }

    fn settle(&mut self, outcome: Settled<V>) {
        self.release();
        self.slot.send_replace(Some(outcome));
        self.settled = true;
    }

    fn release(&self) {
        let slot = &self.slot;
        self.pending
            .remove_if(&self.key, |_, current| Arc::ptr_eq(current, slot));
    }
}

impl<K, V> Drop for LeaderGuard<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn drop(&mut self) {
        if !self.settled {
            warn!(key = ?self.key, "in-flight fetch dropped before settling");
            // Waiters observe the closed channel once the last sender goes.
            self.release();
        }
    }
}

/// Handle for a task waiting on someone else's fetch.
pub struct Waiter<V> {
    rx: watch::Receiver<Option<Settled<V>>>,
}

impl<V: Clone> Waiter<V> {
    /// Wait up to `limit` for the leader to settle.
    pub async fn wait(mut self, limit: Duration) -> Result<V, CacheError> {
        let outcome = match tokio::time::timeout(limit, self.rx.wait_for(Option::is_some)).await {
            Err(_) => return Err(CacheError::Timeout(limit)),
            Ok(Err(_)) => return Err(CacheError::Abandoned),
            Ok(Ok(value)) => value.clone(),
        };

        match outcome {
            Some(Settled::Ready(value)) => Ok(value),
            Some(Settled::Failed(reason)) => Err(CacheError::LeaderFailed(reason)),
            None => Err(CacheError::Abandoned),
        }
    }
}
