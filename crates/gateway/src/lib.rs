//! HTTP API gateway for Gargi.
//!
//! - `GET /npp/{name}`: cached NPP dashboard resources
//! - `POST /gargi/chat`: the energy-analyst chat
//! - `GET /` and `GET /health`: liveness
//!
//! Built on Axum; `HEAD` is answered on every `GET` route.

mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use gargi_agent::{ChatOrchestrator, ContextAssembler};
use gargi_config::AppConfig;
use gargi_core::search::SearchProvider;
use gargi_npp::{DataProxy, ResourceCaches, ResourceCatalog};
use gargi_providers::{HttpFetcher, TavilySearch};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

/// Request body limit for every route.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state.
pub struct AppState {
    pub proxy: DataProxy,
    pub orchestrator: ChatOrchestrator,
    pub start_time: chrono::DateTime<chrono::Utc>,
    /// Browser origins allowed by CORS. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(proxy: DataProxy, orchestrator: ChatOrchestrator) -> Self {
        Self {
            proxy,
            orchestrator,
            start_time: chrono::Utc::now(),
            cors_origins: Vec::new(),
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Wire the real collaborators from config. A missing model key is not
    /// an error here; chat requests report it instead.
    pub fn from_config(config: &AppConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
            config.upstream.timeout_secs,
        )));
        let proxy = DataProxy::new(
            ResourceCatalog::from_config(&config.upstream),
            fetcher,
            ResourceCaches::from_config(&config.cache),
        );

        let search = TavilySearch::from_config(&config.search)
            .map(|s| Arc::new(s) as Arc<dyn SearchProvider>);
        if search.is_none() {
            info!("No search API key set, web search disabled");
        }

        let provider = gargi_providers::build_from_config(&config.model);
        if provider.is_none() {
            warn!("No model API key set, chat requests will fail until one is configured");
        }

        let assembler = ContextAssembler::new(proxy.clone(), search).with_search_config(&config.search);
        let orchestrator = ChatOrchestrator::from_config(config, assembler, provider);

        Self::new(proxy, orchestrator).with_cors_origins(config.gateway.cors_origins.clone())
    }
}

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS for the configured origins, or any origin when none are set
/// - Request body limit (64 KiB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/", get(routes::root_handler))
        .route("/health", get(routes::health_handler))
        .route("/npp/{name}", get(routes::npp_handler))
        .route("/gargi/chat", post(routes::chat_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o.trim() == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = Arc::new(AppState::from_config(&config));
    info!(
        resources = ?state.proxy.catalog().names(),
        chat_enabled = state.orchestrator.has_provider(),
        web_search = state.orchestrator.assembler().has_search(),
        "Gateway state ready"
    );

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
