//! National Power Portal data proxy.
//!
//! Maps logical resource names (`installed-capacity`, `generation-chart`,
//! ...) onto upstream dashboard URLs and serves them through a TTL cache.

pub mod proxy;
pub mod resources;

pub use proxy::{DataProxy, ResourceCaches};
pub use resources::{CacheClass, ResourceCatalog, ResourceDescriptor};
