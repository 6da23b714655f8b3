//! Provider router: selects the LLM backend named in config.

use crate::gemini::GeminiProvider;
use crate::openai_compat::OpenAiCompatProvider;
use gargi_config::ModelConfig;
use gargi_core::provider::Provider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Build the configured provider.
///
/// Returns `None` when the backend needs an API key and none is set; the
/// chat path reports that as a configuration error. Local backends
/// (`ollama`, `vllm`, `llamacpp`) run without a key.
pub fn build_from_config(config: &ModelConfig) -> Option<Arc<dyn Provider>> {
    let name = config.provider.as_str();
    let api_key = config
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty());

    let api_key = match api_key {
        Some(key) => key,
        None if is_keyless(name) => String::new(),
        None => {
            debug!(provider = name, "No model API key configured");
            return None;
        }
    };

    let timeout = Duration::from_secs(config.timeout_secs);

    let provider: Arc<dyn Provider> = if name == "gemini" {
        let mut p = GeminiProvider::new(api_key, timeout);
        if let Some(url) = &config.api_url {
            p = p.with_base_url(url);
        }
        Arc::new(p)
    } else {
        let base_url = config
            .api_url
            .clone()
            .unwrap_or_else(|| default_base_url(name));
        Arc::new(OpenAiCompatProvider::new(name, base_url, api_key, timeout))
    };

    info!(provider = name, model = %config.model, "Model provider ready");
    Some(provider)
}

fn is_keyless(provider_name: &str) -> bool {
    matches!(provider_name, "ollama" | "vllm" | "llamacpp" | "llama.cpp")
}

/// Get the default base URL for well-known providers.
pub fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "gemini" => crate::gemini::GEMINI_API_BASE.into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
