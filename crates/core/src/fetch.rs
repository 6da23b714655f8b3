//! Fetcher trait: plain HTTP GET against the upstream data API.

use crate::error::UpstreamError;
use async_trait::async_trait;

/// Performs GET requests and surfaces every failure as [`UpstreamError`].
///
/// Implementations apply their own request timeout and never retry; any retry
/// policy belongs to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and parse the body as JSON.
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, UpstreamError>;

    /// GET `url` and return the body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, UpstreamError>;
}
