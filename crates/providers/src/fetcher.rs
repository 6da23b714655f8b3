//! Upstream HTTP fetcher backed by `reqwest`.
//!
//! One GET per call, a fixed timeout, no retries. Every failure is mapped
//! onto an [`UpstreamError`] variant so callers can tell timeouts, transport
//! failures, bad statuses and malformed bodies apart.

use async_trait::async_trait;
use gargi_core::error::UpstreamError;
use gargi_core::fetch::Fetcher;
use std::time::Duration;
use tracing::{debug, warn};

/// Default upstream request timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Error bodies are truncated to this many chars before being logged or
/// surfaced.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// A [`Fetcher`] that performs real HTTP GET requests.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gargi/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, UpstreamError> {
        debug!(url, "Fetching upstream resource");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = truncate_chars(&body, MAX_ERROR_BODY_CHARS);
            warn!(url, status = status.as_u16(), "Upstream returned error status");
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, UpstreamError> {
        let body = self.fetch_text(url).await?;
        parse_json(url, &body)
    }

    async fn fetch_text(&self, url: &str) -> Result<String, UpstreamError> {
        let response = self.get(url).await?;
        response
            .text()
            .await
            .map_err(|e| map_transport_error(url, e))
    }
}

fn map_transport_error(url: &str, e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout {
            url: url.to_string(),
        }
    } else {
        UpstreamError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

fn parse_json(url: &str, body: &str) -> Result<serde_json::Value, UpstreamError> {
    serde_json::from_str(body).map_err(|e| UpstreamError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_accepts_valid_body() {
        let value = parse_json("https://npp.gov.in/x", r#"{"linechartforCapacity":[]}"#).unwrap();
        assert!(value["linechartforCapacity"].is_array());
    }

    #[test]
    fn parse_json_rejects_html() {
        let err = parse_json("https://npp.gov.in/x", "<html>maintenance</html>").unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("ऊर्जा ऊर्जा", 3), "ऊर्…");
    }

    #[test]
    fn default_timeout_is_twenty_seconds() {
        assert_eq!(HttpFetcher::default().timeout(), Duration::from_secs(20));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_or_timeout() {
        let fetcher = HttpFetcher::new(Duration::from_millis(500));
        // Port 9 on localhost is the discard service; nothing listens in CI.
        let err = fetcher.fetch_json("http://127.0.0.1:9/none").await.unwrap_err();
        assert!(matches!(
            err,
            UpstreamError::Transport { .. } | UpstreamError::Timeout { .. }
        ));
    }
}
