//! Configuration loading, validation, and management for Gargi.
//!
//! Loads configuration from `~/.gargi/config.toml` with environment
//! variable overrides. Validates all settings at startup.
//!
//! Secrets (model and search API keys) normally come from the environment:
//! `GEMINI_API_KEY` and `TAVILY_API_KEY`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.gargi/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Language model settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Web search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Upstream energy-data API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Cache sizing
    #[serde(default)]
    pub cache: CacheConfig,

    /// Chat behaviour
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

/// Upper bound for `cache.*.ttl_secs`: one year.
pub const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Allowed CORS origins. Empty (or `"*"`) allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_origins: vec![],
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider backend: "gemini" or any OpenAI-compatible name
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override the provider's base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "gemini".into()
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_model_timeout() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            api_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_model_timeout(),
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_search_url")]
    pub api_url: String,

    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    /// Longest snippet (in chars) kept per search hit
    #[serde(default = "default_max_snippet_chars")]
    pub max_snippet_chars: usize,
}

fn default_search_url() -> String {
    "https://api.tavily.com/search".into()
}
fn default_max_results() -> usize {
    3
}
fn default_search_timeout() -> u64 {
    10
}
fn default_max_snippet_chars() -> usize {
    500
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_search_url(),
            max_results: default_max_results(),
            timeout_secs: default_search_timeout(),
            max_snippet_chars: default_max_snippet_chars(),
        }
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("max_results", &self.max_results)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_snippet_chars", &self.max_snippet_chars)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the NPP dashboard API
    #[serde(default = "default_upstream_base")]
    pub base_url: String,

    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,

    /// Additional resources served under `/npp/{name}`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_resources: Vec<ResourceConfig>,
}

fn default_upstream_base() -> String {
    "https://npp.gov.in/dashBoard".into()
}
fn default_upstream_timeout() -> u64 {
    20
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base(),
            timeout_secs: default_upstream_timeout(),
            extra_resources: vec![],
        }
    }
}

/// A configured upstream resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Logical name (URL path segment)
    pub name: String,

    /// Absolute upstream URL
    pub url: String,

    /// Cache class: "volatile" (default) or "reference"
    #[serde(default = "default_cache_class")]
    pub cache_class: String,
}

fn default_cache_class() -> String {
    "volatile".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Short-lived resource data (NPP dashboards)
    #[serde(default = "CacheTierConfig::volatile")]
    pub volatile: CacheTierConfig,

    /// Slow-changing reference data
    #[serde(default = "CacheTierConfig::reference")]
    pub reference: CacheTierConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            volatile: CacheTierConfig::volatile(),
            reference: CacheTierConfig::reference(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheTierConfig {
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl CacheTierConfig {
    pub fn volatile() -> Self {
        Self {
            capacity: 200,
            ttl_secs: 300,
        }
    }

    pub fn reference() -> Self {
        Self {
            capacity: 500,
            ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Keywords added to the built-in energy-domain list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_keywords: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.gargi/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `GEMINI_API_KEY` / `GARGI_MODEL_API_KEY`: model key
    /// - `TAVILY_API_KEY`: search key
    /// - `GARGI_PROVIDER`, `GARGI_MODEL`, `GARGI_HOST`, `GARGI_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("GARGI_MODEL_API_KEY").or_else(|| var("GEMINI_API_KEY")) {
            self.model.api_key = Some(key);
        }
        if let Some(key) = var("TAVILY_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(provider) = var("GARGI_PROVIDER") {
            self.model.provider = provider;
        }
        if let Some(model) = var("GARGI_MODEL") {
            self.model.model = model;
        }
        if let Some(host) = var("GARGI_HOST") {
            self.gateway.host = host;
        }
        if let Some(port) = var("GARGI_PORT") {
            match port.parse() {
                Ok(port) => self.gateway.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid GARGI_PORT"),
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".gargi")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::ValidationError(
                "model.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.search.max_results == 0 || self.search.max_results > 10 {
            return Err(ConfigError::ValidationError(
                "search.max_results must be between 1 and 10".into(),
            ));
        }

        for (tier, cfg) in [
            ("volatile", &self.cache.volatile),
            ("reference", &self.cache.reference),
        ] {
            if cfg.capacity == 0 || cfg.ttl_secs == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "cache.{tier} capacity and ttl_secs must be > 0"
                )));
            }
            if cfg.ttl_secs > MAX_CACHE_TTL_SECS {
                return Err(ConfigError::ValidationError(format!(
                    "cache.{tier}.ttl_secs must be at most {MAX_CACHE_TTL_SECS} (one year)"
                )));
            }
        }

        for resource in &self.upstream.extra_resources {
            if resource.name.is_empty() || resource.name.contains('/') {
                return Err(ConfigError::ValidationError(format!(
                    "invalid resource name '{}'",
                    resource.name
                )));
            }
            if !resource.url.starts_with("http://") && !resource.url.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "resource '{}' url must start with http:// or https://",
                    resource.name
                )));
            }
            let class = resource.cache_class.trim().to_ascii_lowercase();
            if !matches!(class.as_str(), "volatile" | "reference") {
                return Err(ConfigError::ValidationError(format!(
                    "resource '{}' cache_class must be 'volatile' or 'reference'",
                    resource.name
                )));
            }
        }

        Ok(())
    }

    /// Whether a model API key is available.
    pub fn has_model_key(&self) -> bool {
        self.model.api_key.is_some()
    }

    /// Whether a search API key is available.
    pub fn has_search_key(&self) -> bool {
        self.search.api_key.is_some()
    }

    /// Generate a default config file as a TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }

    /// Generate a TOML rendering of the config with secrets stripped.
    pub fn to_redacted_toml(&self) -> String {
        let mut config = self.clone();
        config.model.api_key = None;
        config.search.api_key = None;
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
