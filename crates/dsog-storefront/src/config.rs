//! Storefront configuration.
//!
//! A default configuration ships with the crate and is compiled in. A user
//! file (`dsog.toml`, `.dsog.toml` or `dsog.json`) is laid over it: tables
//! merge key by key, anything else replaces the shipped value.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dsog_commerce::catalog::{CategoryFilter, Page, ProductRecord};
use dsog_commerce::checkout::OrderContact;
use dsog_commerce::franchisee::{Franchisee, FranchiseeDirectory};
use dsog_ui::RenderConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// The shipped configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../config/storefront.toml");

/// Environment variable that overrides `catalog.endpoint`.
pub const ENDPOINT_ENV: &str = "DSOG_ENDPOINT";

/// File names searched for, in order, in each directory up the tree.
const CONFIG_NAMES: [&str; 3] = ["dsog.toml", ".dsog.toml", "dsog.json"];

/// Complete storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    pub store: StoreConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub render: RenderSettings,
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub franchisees: BTreeMap<String, Franchisee>,
    /// Category filter buttons, keyed by collection.
    #[serde(default)]
    pub filters: BTreeMap<String, Vec<CategoryFilter>>,
    /// Collections to warm, keyed by page (`home`, a collection, or `default`).
    #[serde(default)]
    pub preload: BTreeMap<String, Vec<String>>,
}

/// Store identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub name: String,
    /// WhatsApp number orders go to when no franchisee is active.
    pub main_whatsapp: String,
}

/// Catalog endpoint and caching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub endpoint: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// How long a caller waits on another caller's fetch before falling back.
    #[serde(default = "default_inflight_wait_secs")]
    pub inflight_wait_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_preload_delay_ms")]
    pub preload_delay_ms: u64,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_inflight_wait_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_preload_delay_ms() -> u64 {
    1000
}

/// Rendering and featured-products settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub max_cards: usize,
    pub lazy_margin_px: u32,
    pub lazy_threshold: f32,
    pub skeleton_cards: usize,
    pub default_description: String,
    pub featured_per_collection: usize,
    pub featured_limit: usize,
    pub featured_collections: Vec<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let base = RenderConfig::default();
        Self {
            max_cards: base.max_cards,
            lazy_margin_px: base.lazy_margin_px,
            lazy_threshold: base.lazy_threshold,
            skeleton_cards: base.skeleton_cards,
            default_description: base.default_description,
            featured_per_collection: 2,
            featured_limit: 8,
            featured_collections: vec!["mens".into(), "womens".into(), "kids".into()],
        }
    }
}

/// Products served when the catalog endpoint cannot be reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Collection used for names with no fallback list of their own.
    pub default_collection: String,
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<ProductRecord>>,
}

impl StorefrontConfig {
    /// The shipped configuration.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Parse a complete configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` over the shipped configuration. `.json` files are parsed
    /// as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let overrides: toml::Value = if path.extension().is_some_and(|ext| ext == "json") {
            let json: serde_json::Value = serde_json::from_str(&content)?;
            toml::Value::try_from(json).map_err(|e| ConfigError::invalid(e.to_string()))?
        } else {
            toml::from_str(&content)?
        };

        let mut merged: toml::Value = toml::from_str(DEFAULT_CONFIG)?;
        merge(&mut merged, overrides);

        let config: Self = merged.try_into()?;
        config.validate()?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Pick the configuration for a run: `path` when given, else the first
    /// config file found from `start` upwards, else the shipped one. The
    /// endpoint override from the environment is applied last.
    pub fn resolve(path: Option<&Path>, start: &Path) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => match find_config(start) {
                Some(found) => Self::load(&found)?,
                None => Self::embedded()?,
            },
        };
        let config = config.with_endpoint(std::env::var(ENDPOINT_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace the catalog endpoint when `endpoint` is set and non-blank.
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            debug!(endpoint = %endpoint, "catalog endpoint overridden");
            self.catalog.endpoint = endpoint;
        }
        self
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.endpoint.trim().is_empty() {
            return Err(ConfigError::invalid("catalog.endpoint is empty"));
        }
        if self.catalog.cache_ttl_secs == 0 {
            return Err(ConfigError::invalid("catalog.cache_ttl_secs must be > 0"));
        }
        if self.catalog.inflight_wait_secs == 0 {
            return Err(ConfigError::invalid("catalog.inflight_wait_secs must be > 0"));
        }
        if self.render.max_cards == 0 {
            return Err(ConfigError::invalid("render.max_cards must be > 0"));
        }
        if !self
            .fallback
            .collections
            .contains_key(&self.fallback.default_collection)
        {
            return Err(ConfigError::invalid(format!(
                "fallback.default_collection '{}' has no fallback products",
                self.fallback.default_collection
            )));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog.cache_ttl_secs)
    }

    pub fn inflight_wait(&self) -> Duration {
        Duration::from_secs(self.catalog.inflight_wait_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.request_timeout_secs)
    }

    pub fn preload_delay(&self) -> Duration {
        Duration::from_millis(self.catalog.preload_delay_ms)
    }

    pub fn franchisee_directory(&self) -> FranchiseeDirectory {
        let mut directory = FranchiseeDirectory::new();
        for (code, franchisee) in &self.franchisees {
            directory.insert(code.as_str(), franchisee.clone());
        }
        directory
    }

    /// Filter buttons for `collection`. Empty when none are configured.
    pub fn filters_for(&self, collection: &str) -> &[CategoryFilter] {
        self.filters
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Collections to warm while `page` is shown.
    pub fn preload_for(&self, page: &Page) -> &[String] {
        self.preload
            .get(page.key())
            .or_else(|| self.preload.get("default"))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Renderer settings, with the main WhatsApp line as the contact number.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            max_cards: self.render.max_cards,
            lazy_margin_px: self.render.lazy_margin_px,
            lazy_threshold: self.render.lazy_threshold,
            skeleton_cards: self.render.skeleton_cards,
            default_description: self.render.default_description.clone(),
            contact_number: self.store.main_whatsapp.clone(),
        }
    }

    /// Order contact for the store's own line.
    pub fn main_line(&self) -> OrderContact {
        OrderContact::main_line(&self.store.name, &self.store.main_whatsapp)
    }
}

/// Search `start` and its ancestors for a config file.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

fn merge(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = StorefrontConfig::embedded().unwrap();
        assert_eq!(config.store.name, "DSOG STORES");
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.inflight_wait(), Duration::from_secs(10));
        assert_eq!(config.fallback.collections["mens"].len(), 2);
        assert_eq!(config.franchisee_directory().len(), 6);
    }

    #[test]
    fn test_render_config_uses_main_line() {
        let config = StorefrontConfig::embedded().unwrap();
        let render = config.render_config();
        assert_eq!(render.max_cards, 20);
        assert_eq!(render.contact_number, "254733737983");
    }

    #[test]
    fn test_filters_for_collection() {
        let config = StorefrontConfig::embedded().unwrap();
        let filters = config.filters_for("womens");
        assert_eq!(filters[0], CategoryFilter::new("all", "All Products"));
        assert!(filters.iter().any(|f| f.id == "dress"));
        assert!(config.filters_for("gifts").is_empty());
    }

    #[test]
    fn test_preload_for_page_falls_back_to_default() {
        let config = StorefrontConfig::embedded().unwrap();
        assert_eq!(
            config.preload_for(&Page::Collection("kids".into())),
            ["mens", "gifts"]
        );
        assert_eq!(config.preload_for(&Page::Home), ["mens", "womens"]);
        assert_eq!(
            config.preload_for(&Page::Collection("accessories".into())),
            ["mens", "womens"]
        );
    }

    #[test]
    fn test_endpoint_override() {
        let config = StorefrontConfig::embedded()
            .unwrap()
            .with_endpoint(Some("http://localhost:8080/exec".into()));
        assert_eq!(config.catalog.endpoint, "http://localhost:8080/exec");

        let config = config.with_endpoint(Some("   ".into()));
        assert_eq!(config.catalog.endpoint, "http://localhost:8080/exec");
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = StorefrontConfig::embedded().unwrap();
        config.catalog.cache_ttl_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_default_fallback() {
        let mut config = StorefrontConfig::embedded().unwrap();
        config.fallback.default_collection = "shoes".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shoes"));
    }

    #[test]
    fn test_load_overlays_shipped_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsog.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[catalog]\nendpoint = \"http://localhost:9000/exec\"\ncache_ttl_secs = 60\n\n\
             [franchisees.amy]\nname = \"Amy\"\nphone = \"254700000000\"\nlocation = \"Eldoret\""
        )
        .unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        assert_eq!(config.catalog.endpoint, "http://localhost:9000/exec");
        assert_eq!(config.catalog.cache_ttl_secs, 60);
        assert_eq!(config.catalog.inflight_wait_secs, 10);
        assert_eq!(config.franchisees.len(), 7);
        assert_eq!(config.store.name, "DSOG STORES");
    }

    #[test]
    fn test_load_json_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsog.json");
        std::fs::write(&path, r#"{"store": {"name": "DSOG Test"}}"#).unwrap();

        let config = StorefrontConfig::load(&path).unwrap();
        assert_eq!(config.store.name, "DSOG Test");
        assert_eq!(config.store.main_whatsapp, "254733737983");
    }

    #[test]
    fn test_load_missing_file() {
        let err = StorefrontConfig::load(Path::new("/nonexistent/dsog.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".dsog.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join(".dsog.toml")));
    }
}
