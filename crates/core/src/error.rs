//! Error types for the Gargi domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator has its own error type; [`Error`] is what request
//! handlers surface to callers.

use thiserror::Error;

/// The top-level error type for request handling.
#[derive(Debug, Error)]
pub enum Error {
    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Caller errors ---
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // --- Model errors ---
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    // --- Data proxy errors ---
    #[error("Data proxy error: {0}")]
    Proxy(#[from] ProxyError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Collaborator errors ---

/// Failure talking to the upstream energy-data API.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("Upstream request to {url} timed out")]
    Timeout { url: String },

    #[error("Upstream transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Upstream {url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Upstream {url} returned an unparseable body: {reason}")]
    Parse { url: String, reason: String },
}

impl UpstreamError {
    /// A short, stable label for the failure kind (used as a log field).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Transport { .. } => "transport",
            Self::Status { .. } => "status",
            Self::Parse { .. } => "parse",
        }
    }
}

/// Failure resolving a logical data resource.
#[derive(Debug, Clone, Error)]
pub enum ProxyError {
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Failure talking to the web-search service.
///
/// These never reach a caller; the context assembler downgrades them to an
/// empty web context. They exist so that each cause can be logged on its own.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Search provider not configured")]
    NotConfigured,

    #[error("Search timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Search transport failure: {0}")]
    Transport(String),

    #[error("Search provider returned status {status}")]
    Status { status: u16 },

    #[error("Search response could not be parsed: {0}")]
    Parse(String),
}

impl SearchError {
    /// A short, stable label for the failure kind (used as a log field).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Timeout { .. } => "timeout",
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Parse(_) => "parse",
        }
    }
}

/// Failure talking to the language model.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model returned no text")]
    EmptyResponse,
}
