//! Tavily web search client.
//!
//! `POST {api_url}` with a bearer key and `{query, max_results}`; the
//! `results` array is mapped onto [`SearchHit`]s in ranked order.

use async_trait::async_trait;
use gargi_config::SearchConfig;
use gargi_core::error::SearchError;
use gargi_core::search::{SearchHit, SearchProvider};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub struct TavilySearch {
    api_url: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for TavilySearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TavilySearch")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TavilySearch {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            timeout,
            client,
        }
    }

    /// Build a client from config. Returns `None` when no key is set,
    /// which callers treat as "web search unavailable".
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        let key = config.api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        Some(Self::new(
            &config.api_url,
            key,
            Duration::from_secs(config.timeout_secs),
        ))
    }
}

#[async_trait]
impl SearchProvider for TavilySearch {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        debug!(max_results, "Sending Tavily search request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "query": query,
                "max_results": max_results,
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else {
                    SearchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Tavily returned error status");
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        parse_results(&body, max_results)
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

fn parse_results(body: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
    let parsed: TavilyResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(parsed
        .results
        .into_iter()
        .take(max_results)
        .map(|r| SearchHit {
            title: r.title,
            url: r.url,
            content: r.content,
        })
        .collect())
}
