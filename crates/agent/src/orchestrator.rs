//! Chat orchestrator: one request from question to answer.
//!
//! `Received → Gated → ContextBuilt → ModelInvoked → Responded`, with an
//! early exit to `OutOfDomain` when the gate rejects the question. Only a
//! missing model, an empty query or a failed model call are errors; every
//! other problem degrades the context instead.

use crate::context::{ContextAssembler, WebContext, render_snapshot};
use crate::gate::DomainGate;
use crate::persona::{NPP_SOURCE, OUT_OF_DOMAIN_RESPONSE, build_prompt};
use gargi_config::AppConfig;
use gargi_core::chat::{ChatRequest, ChatResponse};
use gargi_core::error::{Error, Result};
use gargi_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::{Instrument, debug, info, info_span, warn};

/// Where a request is in the pipeline. Logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Received,
    Gated,
    OutOfDomain,
    ContextBuilt,
    ModelInvoked,
    Responded,
}

#[derive(Clone)]
pub struct ChatOrchestrator {
    gate: DomainGate,
    assembler: ContextAssembler,
    provider: Option<Arc<dyn Provider>>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl ChatOrchestrator {
    /// `provider` is `None` when no model key is configured; every chat
    /// request then fails with a configuration error.
    pub fn new(assembler: ContextAssembler, provider: Option<Arc<dyn Provider>>, model: impl Into<String>) -> Self {
        Self {
            gate: DomainGate::new(),
            assembler,
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }

    /// Model parameters and extra keywords from config.
    pub fn from_config(
        config: &AppConfig,
        assembler: ContextAssembler,
        provider: Option<Arc<dyn Provider>>,
    ) -> Self {
        let mut orchestrator = Self::new(assembler, provider, &config.model.model)
            .with_gate(DomainGate::with_keywords(&config.chat.extra_keywords));
        orchestrator.temperature = config.model.temperature;
        orchestrator.max_tokens = Some(config.model.max_tokens);
        orchestrator
    }

    pub fn with_gate(mut self, gate: DomainGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn assembler(&self) -> &ContextAssembler {
        &self.assembler
    }

    /// Answer one chat request.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse> {
        let span = info_span!(
            "chat",
            request_id = %uuid::Uuid::new_v4(),
            web = request.use_web_search,
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: ChatRequest) -> Result<ChatResponse> {
        transition(ChatState::Received);

        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| Error::config("model API key not configured"))?;

        let query = request.query.trim();
        if query.is_empty() {
            return Err(Error::InvalidRequest("query must not be empty".into()));
        }

        if !self.gate.is_in_domain(query) {
            transition(ChatState::OutOfDomain);
            info!("Query rejected by domain gate");
            return Ok(ChatResponse {
                response: OUT_OF_DOMAIN_RESPONSE.to_string(),
                sources: Vec::new(),
                web_search_used: false,
            });
        }
        transition(ChatState::Gated);

        let (snapshot, web) = tokio::join!(
            self.assembler.build_snapshot(),
            async {
                if request.use_web_search {
                    self.assembler.build_web_context(query).await
                } else {
                    WebContext::empty()
                }
            },
        );

        let mut sources = Vec::new();
        if !snapshot.is_empty() {
            sources.push(NPP_SOURCE.to_string());
        }
        sources.extend(web.sources.iter().cloned());
        transition(ChatState::ContextBuilt);
        debug!(
            snapshot = !snapshot.is_empty(),
            web_sources = web.sources.len(),
            "Context assembled"
        );

        let prompt = build_prompt(query, &render_snapshot(&snapshot), &web.text);
        let mut model_request = ProviderRequest::single_prompt(&self.model, prompt);
        model_request.temperature = self.temperature;
        model_request.max_tokens = self.max_tokens;

        transition(ChatState::ModelInvoked);
        let response = provider.complete(model_request).await.map_err(|e| {
            warn!(provider = provider.name(), error = %e, "Model call failed");
            Error::Model(e)
        })?;

        transition(ChatState::Responded);
        if let Some(usage) = response.usage {
            debug!(
                model = %response.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Model usage"
            );
        }

        Ok(ChatResponse {
            response: response.text,
            sources,
            web_search_used: request.use_web_search,
        })
    }
}

fn transition(state: ChatState) {
    debug!(state = ?state, "Chat state");
}
