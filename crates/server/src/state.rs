use crate::config::ServerConfig;
use crate::error::ServerResult;
use catalog::CatalogStore;
use matcher::CompatibilityMatcher;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Catalog store, shared with the matcher
    pub store: Arc<dyn CatalogStore>,

    /// Matcher instance (shared across requests)
    pub matcher: Arc<CompatibilityMatcher>,

    /// Renders `/metrics`; `None` when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl ServerState {
    /// Open the catalog and build the matcher described by
    /// `config.pipeline_config`.
    pub async fn new(config: ServerConfig) -> ServerResult<Self> {
        let nav = config
            .navcompat_config()
            .map_err(|err| crate::ServerError::Config(err.to_string()))?;
        let store = navcompat::open_catalog(&nav.catalog).await?;
        let matcher = navcompat::build_matcher(&nav, store.clone())?;

        Ok(Self::from_parts(config, store, matcher))
    }

    /// Assemble state from an already-built store and matcher.
    pub fn from_parts(
        config: ServerConfig,
        store: Arc<dyn CatalogStore>,
        matcher: CompatibilityMatcher,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            matcher: Arc::new(matcher),
            metrics_handle: None,
        }
    }

    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
