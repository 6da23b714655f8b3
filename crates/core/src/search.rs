//! SearchProvider trait: the optional web-search collaborator.

use crate::error::SearchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One web search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    /// Text snippet extracted from the page.
    pub content: String,
}

/// A web search backend (Tavily, or a mock in tests).
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Name used in log fields.
    fn name(&self) -> &str;

    /// Run `query`, returning at most `max_results` hits in ranked order.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}
