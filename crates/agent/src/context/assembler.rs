//! Gathers the snapshot and web context for one chat request.

use crate::context::snapshot::{extract_capacity, extract_generation, extract_realtime};
use crate::context::web::WebContext;
use gargi_config::SearchConfig;
use gargi_core::error::{ProxyError, SearchError};
use gargi_core::search::SearchProvider;
use gargi_core::snapshot::EnergySnapshot;
use gargi_npp::DataProxy;
use gargi_npp::resources::{GENERATION_CHART, INSTALLED_CAPACITY, MAP_DATA};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MAX_RESULTS: usize = 3;
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_SNIPPET_CHARS: usize = 500;

#[derive(Clone)]
pub struct ContextAssembler {
    proxy: DataProxy,
    search: Option<Arc<dyn SearchProvider>>,
    max_results: usize,
    search_timeout: Duration,
    max_snippet_chars: usize,
}

impl ContextAssembler {
    pub fn new(proxy: DataProxy, search: Option<Arc<dyn SearchProvider>>) -> Self {
        Self {
            proxy,
            search,
            max_results: DEFAULT_MAX_RESULTS,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            max_snippet_chars: DEFAULT_MAX_SNIPPET_CHARS,
        }
    }

    /// Take result count, timeout and snippet length from config.
    pub fn with_search_config(mut self, config: &SearchConfig) -> Self {
        self.max_results = config.max_results;
        self.search_timeout = Duration::from_secs(config.timeout_secs);
        self.max_snippet_chars = config.max_snippet_chars;
        self
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn proxy(&self) -> &DataProxy {
        &self.proxy
    }

    /// Fetch the three snapshot resources concurrently. A failed resource
    /// leaves its section empty.
    pub async fn build_snapshot(&self) -> EnergySnapshot {
        let (capacity, generation, map) = tokio::join!(
            self.proxy.get_resource(INSTALLED_CAPACITY),
            self.proxy.get_resource(GENERATION_CHART),
            self.proxy.get_resource(MAP_DATA),
        );

        EnergySnapshot {
            capacity: settle(INSTALLED_CAPACITY, capacity)
                .map(|v| extract_capacity(&v))
                .unwrap_or_default(),
            generation: settle(GENERATION_CHART, generation)
                .map(|v| extract_generation(&v))
                .unwrap_or_default(),
            realtime: settle(MAP_DATA, map)
                .map(|v| extract_realtime(&v))
                .unwrap_or_default(),
        }
    }

    /// Search the web for `query`. Never fails; any problem yields
    /// [`WebContext::empty`].
    pub async fn build_web_context(&self, query: &str) -> WebContext {
        match self.search(query).await {
            Ok(ctx) => ctx,
            Err(SearchError::NotConfigured) => {
                debug!("Web search requested but no search provider is configured");
                WebContext::empty()
            }
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Web search failed, continuing without it");
                WebContext::empty()
            }
        }
    }

    async fn search(&self, query: &str) -> Result<WebContext, SearchError> {
        let search = self.search.as_ref().ok_or(SearchError::NotConfigured)?;

        let hits = tokio::time::timeout(self.search_timeout, search.search(query, self.max_results))
            .await
            .map_err(|_| SearchError::Timeout {
                timeout_secs: self.search_timeout.as_secs(),
            })??;

        if hits.is_empty() {
            debug!(provider = search.name(), "Web search returned no results");
        }

        let hits: Vec<_> = hits.into_iter().take(self.max_results).collect();
        Ok(WebContext::from_hits(&hits, self.max_snippet_chars))
    }
}

fn settle(resource: &str, result: Result<Value, ProxyError>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            let kind = match &e {
                ProxyError::UnknownResource(_) => "unknown_resource",
                ProxyError::Upstream(u) => u.kind(),
            };
            warn!(resource, kind, error = %e, "Snapshot resource unavailable");
            None
        }
    }
}
