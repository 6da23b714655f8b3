//! Cache-aside proxy over the upstream dashboard API.

use crate::resources::{CacheClass, ResourceCatalog, ResourceDescriptor};
use gargi_cache::{CacheStats, TtlCache};
use gargi_config::CacheConfig;
use gargi_core::error::ProxyError;
use gargi_core::fetch::Fetcher;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// One cache per [`CacheClass`], shared by every clone of the proxy.
#[derive(Clone)]
pub struct ResourceCaches {
    pub volatile: Arc<TtlCache<Value>>,
    pub reference: Arc<TtlCache<Value>>,
}

impl ResourceCaches {
    pub fn new(volatile: TtlCache<Value>, reference: TtlCache<Value>) -> Self {
        Self {
            volatile: Arc::new(volatile),
            reference: Arc::new(reference),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            TtlCache::new(
                config.volatile.capacity,
                Duration::from_secs(config.volatile.ttl_secs),
            ),
            TtlCache::new(
                config.reference.capacity,
                Duration::from_secs(config.reference.ttl_secs),
            ),
        )
    }

    pub fn for_class(&self, class: CacheClass) -> &TtlCache<Value> {
        match class {
            CacheClass::Volatile => &self.volatile,
            CacheClass::Reference => &self.reference,
        }
    }
}

impl Default for ResourceCaches {
    fn default() -> Self {
        Self::new(TtlCache::volatile(), TtlCache::reference())
    }
}

/// Serves catalog resources, fetching from upstream only on a cache miss.
#[derive(Clone)]
pub struct DataProxy {
    catalog: Arc<ResourceCatalog>,
    fetcher: Arc<dyn Fetcher>,
    caches: ResourceCaches,
}

impl DataProxy {
    pub fn new(catalog: ResourceCatalog, fetcher: Arc<dyn Fetcher>, caches: ResourceCaches) -> Self {
        Self {
            catalog: Arc::new(catalog),
            fetcher,
            caches,
        }
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Return the JSON for `name`, from cache when fresh.
    ///
    /// Only successful fetches are cached; an upstream failure is returned
    /// to the caller and the next request tries again.
    pub async fn get_resource(&self, name: &str) -> Result<Value, ProxyError> {
        let descriptor = self
            .catalog
            .get(name)
            .ok_or_else(|| ProxyError::UnknownResource(name.to_string()))?;

        let cache = self.caches.for_class(descriptor.cache_class);
        if let Some(value) = cache.get(name) {
            debug!(resource = name, "Cache hit");
            return Ok(value);
        }

        debug!(resource = name, class = descriptor.cache_class.as_str(), "Cache miss");
        let value = self.fetch(descriptor).await?;
        cache.insert(name, value.clone());
        Ok(value)
    }

    async fn fetch(&self, descriptor: &ResourceDescriptor) -> Result<Value, ProxyError> {
        self.fetcher.fetch_json(&descriptor.url).await.map_err(|e| {
            warn!(
                resource = %descriptor.name,
                kind = e.kind(),
                error = %e,
                "Upstream fetch failed"
            );
            ProxyError::Upstream(e)
        })
    }

    /// Counters for the (volatile, reference) caches.
    pub fn cache_stats(&self) -> (CacheStats, CacheStats) {
        (self.caches.volatile.stats(), self.caches.reference.stats())
    }
}
