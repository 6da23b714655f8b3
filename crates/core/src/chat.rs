//! Chat request and response shapes for `POST /gargi/chat`.

use serde::{Deserialize, Serialize};

/// An inbound chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question. Must be non-empty.
    pub query: String,

    /// Whether to augment the prompt with web search results.
    #[serde(default)]
    pub use_web_search: bool,
}

impl ChatRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            use_web_search: false,
        }
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.use_web_search = enabled;
        self
    }
}

/// The chat answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The model's answer, or the canned out-of-domain reply.
    pub response: String,

    /// Context sources in the order they were gathered.
    pub sources: Vec<String>,

    /// Echo of the request's `use_web_search` flag.
    pub web_search_used: bool,
}
