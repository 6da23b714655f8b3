//! Native Gemini provider.
//!
//! Speaks the `generateContent` REST endpoint directly with an API key.
//! Gemini 2.5 models may return "thought" parts alongside the answer; only
//! the non-thought text is returned.

use async_trait::async_trait;
use gargi_core::error::ModelError;
use gargi_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Gemini v1beta REST API base.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: GEMINI_API_BASE.to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Point the provider at a different API base (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Build a `generateContent` body: the prompt as one user turn.
    fn build_body(request: &ProviderRequest) -> Value {
        let mut generation_config = json!({ "temperature": request.temperature });
        if let Some(max_tokens) = request.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }

        json!({
            "contents": [{ "role": "user", "parts": [{ "text": &request.prompt }] }],
            "generationConfig": generation_config,
        })
    }

    /// Extract the answer text, skipping parts tagged `"thought": true`.
    ///
    /// Falls back to thought text when nothing else is present.
    fn extract_text(response: &Value) -> Option<String> {
        let parts = response["candidates"][0]["content"]["parts"].as_array()?;

        let answer: Vec<&str> = parts
            .iter()
            .filter(|p| !p["thought"].as_bool().unwrap_or(false))
            .filter_map(|p| p["text"].as_str())
            .collect();
        if !answer.is_empty() {
            return Some(answer.join(""));
        }

        let thoughts: Vec<&str> = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        (!thoughts.is_empty()).then(|| thoughts.join(""))
    }

    fn extract_usage(response: &Value) -> Option<Usage> {
        let meta = response.get("usageMetadata")?;
        let prompt = meta["promptTokenCount"].as_u64()? as u32;
        let completion = meta["candidatesTokenCount"].as_u64().unwrap_or(0) as u32;
        let total = meta["totalTokenCount"]
            .as_u64()
            .map(|t| t as u32)
            .unwrap_or(prompt + completion);
        Some(Usage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: total,
        })
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ModelError> {
        let body = Self::build_body(&request);

        debug!(model = %request.model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(self.api_url(&request.model))
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(e.to_string())
                } else {
                    ModelError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ModelError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ModelError::AuthenticationFailed(
                "Invalid Gemini API key or insufficient permissions".into(),
            ));
        }

        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            let message = Self::error_message(&error_body);
            warn!(status, message = %message, "Gemini returned error");
            return Err(ModelError::ApiError {
                status_code: status,
                message,
            });
        }

        let json: Value = response.json().await.map_err(|e| ModelError::ApiError {
            status_code: status,
            message: format!("Failed to parse Gemini response: {e}"),
        })?;

        let text = Self::extract_text(&json).ok_or(ModelError::EmptyResponse)?;
        let model = json["modelVersion"]
            .as_str()
            .map(String::from)
            .unwrap_or(request.model);

        Ok(ProviderResponse {
            text,
            usage: Self::extract_usage(&json),
            model,
        })
    }
}
