//! Application context.
//!
//! Everything the storefront needs, built once per run and passed down.

use std::sync::Arc;

use dsog_commerce::franchisee::FranchiseeDirectory;
use dsog_data::{CatalogClient, Gateway, HttpGateway};
use dsog_ui::Renderer;
use tracing::debug;

use crate::config::StorefrontConfig;
use crate::data_manager::DataManager;
use crate::error::StorefrontError;
use crate::session::{FranchiseeSession, SessionStore};

/// Wired-up storefront services.
pub struct AppContext {
    pub config: StorefrontConfig,
    pub data: Arc<DataManager>,
    pub renderer: Renderer,
    pub franchisees: FranchiseeDirectory,
    pub session: FranchiseeSession,
}

impl AppContext {
    /// Build the context around `gateway`. The franchisee session is
    /// resolved from `query` and `store`.
    pub fn new(
        config: StorefrontConfig,
        gateway: Arc<dyn Gateway>,
        store: &dyn SessionStore,
        query: Option<&str>,
    ) -> Result<Self, StorefrontError> {
        let client = CatalogClient::new(gateway, &config.catalog.endpoint)?;
        let data = Arc::new(DataManager::from_config(client, &config)?);
        let renderer = Renderer::new(config.render_config());
        let franchisees = config.franchisee_directory();
        let session = FranchiseeSession::resolve(&franchisees, store, query);

        debug!(
            endpoint = %config.catalog.endpoint,
            franchisee = session.code().map(|c| c.as_str()).unwrap_or("none"),
            "storefront context ready"
        );

        Ok(Self {
            config,
            data,
            renderer,
            franchisees,
            session,
        })
    }

    /// Build the context over HTTP.
    pub fn connect(
        config: StorefrontConfig,
        store: &dyn SessionStore,
        query: Option<&str>,
    ) -> Result<Self, StorefrontError> {
        let gateway = Arc::new(HttpGateway::new(config.request_timeout())?);
        Self::new(config, gateway, store, query)
    }

    /// Use a renderer with no visibility observer, so images load eagerly.
    pub fn without_lazy_images(mut self) -> Self {
        self.renderer = Renderer::without_observer(self.config.render_config());
        self
    }
}
