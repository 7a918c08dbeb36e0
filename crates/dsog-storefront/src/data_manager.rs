//! Product data manager.
//!
//! Answers `get_products` from, in order: the TTL cache, a fetch already in
//! flight for the same collection, a new fetch, and finally the configured
//! fallback list. It never fails. Fallback lists are never cached.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dsog_cache::{Claim, InFlight, TtlCache};
use dsog_commerce::catalog::{cache_key, Product, ProductRecord};
use dsog_data::CatalogClient;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::{FallbackConfig, StorefrontConfig};
use crate::error::StorefrontError;

/// Shared, immutable product list.
pub type ProductList = Arc<[Product]>;

/// Where a product list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Fresh cache entry.
    Cache,
    /// This call fetched it.
    Network,
    /// Another call's fetch, waited on.
    Shared,
    /// The catalog endpoint could not supply it.
    Fallback,
}

impl CatalogSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogSource::Cache => "cache",
            CatalogSource::Network => "network",
            CatalogSource::Shared => "shared",
            CatalogSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product list and its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProducts {
    pub products: ProductList,
    pub source: CatalogSource,
}

impl LoadedProducts {
    fn new(products: ProductList, source: CatalogSource) -> Self {
        Self { products, source }
    }
}

/// Per-collection fallback lists.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    default_collection: String,
    lists: HashMap<String, ProductList>,
}

impl FallbackCatalog {
    pub fn new(
        default_collection: impl Into<String>,
        collections: BTreeMap<String, Vec<ProductRecord>>,
    ) -> Self {
        let lists = collections
            .into_iter()
            .map(|(name, records)| {
                let products: Vec<Product> = records.into_iter().map(Product::from).collect();
                (name, ProductList::from(products))
            })
            .collect();
        Self {
            default_collection: default_collection.into(),
            lists,
        }
    }

    pub fn from_config(config: &FallbackConfig) -> Self {
        Self::new(&config.default_collection, config.collections.clone())
    }

    /// Fallback list for `collection`, or the default collection's list.
    pub fn products_for(&self, collection: &str) -> ProductList {
        self.lists
            .get(collection)
            .or_else(|| self.lists.get(&self.default_collection))
            .cloned()
            .unwrap_or_else(|| ProductList::from(Vec::new()))
    }
}

/// Cached, deduplicated access to catalog products.
pub struct DataManager {
    client: CatalogClient,
    cache: TtlCache<String, ProductList>,
    inflight: InFlight<String, ProductList>,
    fallback: FallbackCatalog,
    inflight_wait: Duration,
}

impl DataManager {
    pub fn new(
        client: CatalogClient,
        cache: TtlCache<String, ProductList>,
        fallback: FallbackCatalog,
        inflight_wait: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            inflight: InFlight::new(),
            fallback,
            inflight_wait,
        }
    }

    /// Build from configuration.
    pub fn from_config(
        client: CatalogClient,
        config: &StorefrontConfig,
    ) -> Result<Self, StorefrontError> {
        let cache = TtlCache::new(config.cache_ttl())?;
        Ok(Self::new(
            client,
            cache,
            FallbackCatalog::from_config(&config.fallback),
            config.inflight_wait(),
        ))
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Products for `collection`.
    #[instrument(skip(self), fields(source = tracing::field::Empty))]
    pub async fn get_products(&self, collection: &str) -> LoadedProducts {
        let started = Instant::now();
        let key = cache_key(collection);

        let loaded = match self.cache.get(&key) {
            Some(products) => LoadedProducts::new(products, CatalogSource::Cache),
            None => match self.inflight.claim(key.clone()) {
                Claim::Follower(waiter) => match waiter.wait(self.inflight_wait).await {
                    Ok(products) => LoadedProducts::new(products, CatalogSource::Shared),
                    Err(e) => {
                        warn!(collection, error = %e, "shared fetch unavailable, using fallback");
                        self.fallback_for(collection)
                    }
                },
                Claim::Leader(guard) => {
                    // A fetch may have settled between the cache miss and the claim.
                    if let Some(products) = self.cache.get(&key) {
                        guard.complete(products.clone());
                        LoadedProducts::new(products, CatalogSource::Cache)
                    } else {
                        match self.client.products(collection).await {
                            Ok(products) => {
                                let products = ProductList::from(products);
                                self.cache.set(key, products.clone());
                                guard.complete(products.clone());
                                LoadedProducts::new(products, CatalogSource::Network)
                            }
                            Err(e) => {
                                warn!(
                                    collection,
                                    kind = e.kind(),
                                    error = %e,
                                    "catalog fetch failed, using fallback"
                                );
                                guard.fail(e.to_string());
                                self.fallback_for(collection)
                            }
                        }
                    }
                }
            },
        };

        tracing::Span::current().record("source", loaded.source.as_str());
        debug!(
            collection,
            source = %loaded.source,
            count = loaded.products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "products ready"
        );
        loaded
    }

    fn fallback_for(&self, collection: &str) -> LoadedProducts {
        LoadedProducts::new(
            self.fallback.products_for(collection),
            CatalogSource::Fallback,
        )
    }

    /// Whether a fetch for `collection` is outstanding.
    pub fn is_loading(&self, collection: &str) -> bool {
        self.inflight.is_loading(&cache_key(collection))
    }

    /// Drop every cached list.
    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("product cache cleared");
    }
}
