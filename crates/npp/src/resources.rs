//! Resource catalog: logical name to upstream URL and cache class.

use gargi_config::UpstreamConfig;
use std::collections::BTreeMap;
use tracing::warn;

pub const INSTALLED_CAPACITY: &str = "installed-capacity";
pub const GENERATION_CHART: &str = "generation-chart";
pub const TRANSMISSION: &str = "transmission";
pub const MAP_DATA: &str = "map-data";

/// Which cache tier a resource lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheClass {
    /// Dashboard figures that change through the day (5 min).
    Volatile,
    /// Slow-changing reference data (1 h).
    Reference,
}

impl CacheClass {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "volatile" => Some(Self::Volatile),
            "reference" => Some(Self::Reference),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volatile => "volatile",
            Self::Reference => "reference",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub name: String,
    pub url: String,
    pub cache_class: CacheClass,
}

/// The set of resources the proxy will serve. Anything not listed is
/// rejected without touching the network.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: BTreeMap<String, ResourceDescriptor>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four dashboard resources, rooted at `base_url`.
    pub fn builtin(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        let mut catalog = Self::new();
        for (name, path) in [
            (INSTALLED_CAPACITY, "/get_installed_capacity_list"),
            (GENERATION_CHART, "/get_generation_chart_list"),
            (TRANSMISSION, "/getTransmissionLine?ID=IND"),
            (MAP_DATA, "/getBMapData?ID=IND"),
        ] {
            catalog.register(name, format!("{base}{path}"), CacheClass::Volatile);
        }
        catalog
    }

    /// Built-ins plus any `extra_resources` from config. An extra resource
    /// with a built-in name replaces it.
    pub fn from_config(config: &UpstreamConfig) -> Self {
        let mut catalog = Self::builtin(&config.base_url);
        for extra in &config.extra_resources {
            let class = CacheClass::parse(&extra.cache_class).unwrap_or_else(|| {
                warn!(
                    resource = %extra.name,
                    cache_class = %extra.cache_class,
                    "Unknown cache class, using volatile"
                );
                CacheClass::Volatile
            });
            catalog.register(&extra.name, &extra.url, class);
        }
        catalog
    }

    pub fn register(&mut self, name: impl Into<String>, url: impl Into<String>, cache_class: CacheClass) {
        let name = name.into();
        self.resources.insert(
            name.clone(),
            ResourceDescriptor {
                name,
                url: url.into(),
                cache_class,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.resources.get(name)
    }

    /// Resource names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.resources.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
