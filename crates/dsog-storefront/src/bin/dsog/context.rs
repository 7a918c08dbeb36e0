//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dsog_storefront::{AppContext, FileSessionStore, Storefront, StorefrontConfig};

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Referral code passed with `--ref`.
    referral: Option<String>,
}

impl Context {
    /// Resolve configuration from `config_path`, the directory tree, or the
    /// shipped defaults.
    pub fn load(
        config_path: Option<&str>,
        referral: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = StorefrontConfig::resolve(config_path.map(Path::new), &cwd)
            .context("Failed to load storefront configuration")?;
        tracing::debug!(endpoint = %config.catalog.endpoint, "configuration resolved");

        Ok(Self {
            config,
            output,
            cwd,
            referral,
        })
    }

    /// File the franchisee session is kept in.
    pub fn session_path(&self) -> PathBuf {
        dirs_path().join("dsog").join("session.json")
    }

    pub fn session_store(&self) -> FileSessionStore {
        FileSessionStore::new(self.session_path())
    }

    /// Query string carrying the `--ref` code, if one was given.
    pub fn referral_query(&self) -> Option<String> {
        self.referral
            .as_ref()
            .map(|code| format!("franchisee={}", code))
    }

    /// Wire up the storefront over HTTP.
    pub fn storefront(&self) -> Result<Storefront> {
        Ok(Storefront::new(self.app()?))
    }

    /// Build the application context over HTTP.
    pub fn app(&self) -> Result<AppContext> {
        let query = self.referral_query();
        let app = AppContext::connect(self.config.clone(), &self.session_store(), query.as_deref())
            .context("Failed to initialise storefront")?;

        if let Some(code) = &self.referral {
            if app.franchisees.get(code).is_none() {
                self.output
                    .warn(&format!("Unknown franchisee code '{}', ignoring", code));
            }
        }
        Ok(app)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
