//! End-to-end integration tests for the Gargi gateway.
//!
//! These tests drive the full router (proxy, cache, gate, assembler,
//! orchestrator) with mocked upstream, search and model collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use gargi_agent::{ChatOrchestrator, ContextAssembler};
use gargi_config::AppConfig;
use gargi_core::error::{ModelError, SearchError, UpstreamError};
use gargi_core::fetch::Fetcher;
use gargi_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use gargi_core::search::{SearchHit, SearchProvider};
use gargi_gateway::{AppState, build_router};
use gargi_npp::{DataProxy, ResourceCaches, ResourceCatalog};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const BASE: &str = "http://npp.e2e/dashBoard";

// ── Mock collaborators ──────────────────────────────────────────────────

/// Upstream mock keyed by URL path; unknown paths fail with a 500.
#[derive(Default)]
struct UpstreamMock {
    bodies: Mutex<HashMap<String, Value>>,
    calls: AtomicUsize,
}

impl UpstreamMock {
    fn serve(&self, path: &str, body: Value) {
        self.bodies
            .lock()
            .unwrap()
            .insert(format!("{BASE}{path}"), body);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for UpstreamMock {
    async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| UpstreamError::Status {
                url: url.to_string(),
                status: 500,
                body: "Internal Server Error".into(),
            })
    }

    async fn fetch_text(&self, url: &str) -> Result<String, UpstreamError> {
        self.fetch_json(url).await.map(|v| v.to_string())
    }
}

/// Model mock that records prompts and answers with fixed text.
struct ScriptedProvider {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn text(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ModelError> {
        let prompt = request.prompt;
        self.prompts.lock().unwrap().push(prompt);
        Ok(ProviderResponse {
            text: self.answer.clone(),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: request.model,
        })
    }
}

struct SearchMock(Result<Vec<SearchHit>, SearchError>);

#[async_trait::async_trait]
impl SearchProvider for SearchMock {
    fn name(&self) -> &str {
        "e2e_search"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.0
            .clone()
            .map(|hits| hits.into_iter().take(max_results).collect())
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

fn capacity_payload() -> Value {
    json!({
        "linechartforCapacity": [
            {"installed_capacity_thermal": "199877"},
            {
                "installed_capacity_thermal": "243280",
                "installed_capacity_hydro": "46928",
                "installed_capacity_nuclear": "8180",
                "installed_capacity_res": "162476"
            }
        ]
    })
}

fn generation_payload() -> Value {
    json!({
        "linechartforGeneration": [{
            "financial_year": "2023-24",
            "thermal_total": "1326000",
            "hydro": "134000",
            "nuclear": "47900",
            "renewable_energy_sources": "225800"
        }]
    })
}

fn map_payload() -> Value {
    json!({
        "headerMap": {
            "CP_OBJ": {"installed_capacity": "442000", "online_capacity": "301000"},
            "GN_OBJ": {"actual_generation": "4.8"}
        }
    })
}

fn healthy_upstream() -> Arc<UpstreamMock> {
    let upstream = Arc::new(UpstreamMock::default());
    upstream.serve("/get_installed_capacity_list", capacity_payload());
    upstream.serve("/get_generation_chart_list", generation_payload());
    upstream.serve("/getBMapData?ID=IND", map_payload());
    upstream.serve("/getTransmissionLine?ID=IND", json!({"lines": []}));
    upstream
}

fn web_hits() -> Vec<SearchHit> {
    vec![
        SearchHit {
            title: "Grid India".into(),
            url: "https://grid-india.in/report".into(),
            content: "All-India peak demand met: 250 GW".into(),
        },
        SearchHit {
            title: "Untitled".into(),
            url: String::new(),
            content: "No URL on this one".into(),
        },
    ]
}

fn app(
    upstream: Arc<UpstreamMock>,
    search: Option<Arc<dyn SearchProvider>>,
    provider: Option<Arc<dyn Provider>>,
) -> axum::Router {
    let proxy = DataProxy::new(
        ResourceCatalog::builtin(BASE),
        upstream,
        ResourceCaches::default(),
    );
    let assembler = ContextAssembler::new(proxy.clone(), search);
    let orchestrator =
        ChatOrchestrator::from_config(&AppConfig::default(), assembler, provider);
    build_router(Arc::new(AppState::new(proxy, orchestrator)))
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn chat(query: &str, web: bool) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/gargi/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"query": query, "use_web_search": web}).to_string(),
        ))
        .unwrap()
}

// ── E2E: Data proxy ─────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_all_builtin_resources_are_served() {
    let upstream = healthy_upstream();
    let app = app(upstream.clone(), None, None);

    for (name, expected) in [
        ("installed-capacity", capacity_payload()),
        ("generation-chart", generation_payload()),
        ("transmission", json!({"lines": []})),
        ("map-data", map_payload()),
    ] {
        let (status, body) = send(&app, get(&format!("/npp/{name}"))).await;
        assert_eq!(status, StatusCode::OK, "{name}");
        assert_eq!(body, expected, "{name}");
    }
    assert_eq!(upstream.calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn e2e_proxy_cache_expires_after_five_minutes() {
    let upstream = healthy_upstream();
    let app = app(upstream.clone(), None, None);

    send(&app, get("/npp/installed-capacity")).await;
    send(&app, get("/npp/installed-capacity")).await;
    assert_eq!(upstream.calls(), 1);

    tokio::time::advance(Duration::from_secs(301)).await;
    send(&app, get("/npp/installed-capacity")).await;
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn e2e_upstream_failure_then_recovery() {
    let upstream = Arc::new(UpstreamMock::default());
    let app = app(upstream.clone(), None, None);

    let (status, body) = send(&app, get("/npp/generation-chart")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("500"));

    upstream.serve("/get_generation_chart_list", generation_payload());
    let (status, _) = send(&app, get("/npp/generation-chart")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn e2e_unknown_resource_is_404() {
    let upstream = healthy_upstream();
    let app = app(upstream.clone(), None, None);
    let (status, _) = send(&app, get("/npp/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(upstream.calls(), 0);
}

// ── E2E: Chat ───────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_chat_thermal_capacity_without_web() {
    let provider = Arc::new(ScriptedProvider::text("Thermal: 243280 MW..."));
    let app = app(healthy_upstream(), None, Some(provider.clone()));

    let (status, body) = send(&app, chat("current thermal capacity", false)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Thermal: 243280 MW...");
    assert_eq!(body["sources"], json!(["NPP Data"]));
    assert_eq!(body["web_search_used"], false);

    let prompt = provider.last_prompt();
    assert!(prompt.contains("User Query: current thermal capacity"));
    assert!(prompt.contains("Current India Energy Data"));
    assert!(prompt.contains("\"year\": \"2023-24\""));
}

#[tokio::test]
async fn e2e_chat_with_web_sources() {
    let provider = Arc::new(ScriptedProvider::text("Peak demand reached 250 GW."));
    let search: Arc<dyn SearchProvider> = Arc::new(SearchMock(Ok(web_hits())));
    let app = app(healthy_upstream(), Some(search), Some(provider.clone()));

    let (status, body) = send(&app, chat("peak demand", true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["sources"],
        json!(["NPP Data", "https://grid-india.in/report"])
    );
    assert_eq!(body["web_search_used"], true);
    assert!(provider.last_prompt().contains("- Untitled: No URL on this one"));
}

#[tokio::test]
async fn e2e_chat_search_failure_degrades_silently() {
    let provider = Arc::new(ScriptedProvider::text("ok"));
    let search: Arc<dyn SearchProvider> =
        Arc::new(SearchMock(Err(SearchError::Timeout { timeout_secs: 10 })));
    let app = app(healthy_upstream(), Some(search), Some(provider.clone()));

    let (status, body) = send(&app, chat("solar tenders", true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"], json!(["NPP Data"]));
    assert_eq!(body["web_search_used"], true);
    assert!(!provider.last_prompt().contains("Web Search Results"));
}

#[tokio::test]
async fn e2e_chat_out_of_domain_makes_no_calls() {
    let upstream = healthy_upstream();
    let provider = Arc::new(ScriptedProvider::text("should not be used"));
    let app = app(upstream.clone(), None, Some(provider.clone()));

    let (status, body) = send(&app, chat("Tell me a joke about cats", true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"],
        "This question is outside my domain. I specialize in energy sector analysis."
    );
    assert_eq!(body["sources"], json!([]));
    assert_eq!(upstream.calls(), 0);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn e2e_chat_upstream_down_still_answers() {
    let provider = Arc::new(ScriptedProvider::text("Data is unavailable right now."));
    let app = app(Arc::new(UpstreamMock::default()), None, Some(provider.clone()));

    let (status, body) = send(&app, chat("hydro generation", false)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"], json!([]));
    assert!(!provider.last_prompt().contains("Current India Energy Data"));
}

#[tokio::test]
async fn e2e_chat_shares_cache_with_proxy_routes() {
    let upstream = healthy_upstream();
    let provider = Arc::new(ScriptedProvider::text("ok"));
    let app = app(upstream.clone(), None, Some(provider));

    send(&app, get("/npp/installed-capacity")).await;
    send(&app, chat("nuclear capacity", false)).await;
    // capacity came from cache; generation + map were fetched
    assert_eq!(upstream.calls(), 3);
}

#[tokio::test]
async fn e2e_chat_without_model_is_500() {
    let app = app(healthy_upstream(), None, None);
    let (status, body) = send(&app, chat("solar", false)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("not configured"));
}

// ── E2E: Gateway basics ─────────────────────────────────────────────────

#[tokio::test]
async fn e2e_root_and_health() {
    let app = app(healthy_upstream(), None, None);

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "India Energy API is running!");

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

// ── E2E: Configuration System ───────────────────────────────────────────

#[tokio::test]
async fn e2e_config_file_and_env_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[gateway]
port = 9100

[upstream]
base_url = "http://mirror.local/dashBoard"

[[upstream.extra_resources]]
name = "state-list"
url = "http://mirror.local/dashBoard/getStateList"
cache_class = "reference"

[chat]
extra_keywords = ["tariff"]
"#,
    )
    .unwrap();

    let mut config = AppConfig::load_from(&path).unwrap();
    config.apply_env_overrides(|name| match name {
        "GEMINI_API_KEY" => Some("AIza-e2e".into()),
        "GARGI_PORT" => Some("9200".into()),
        _ => None,
    });

    assert_eq!(config.gateway.port, 9200);
    assert!(config.has_model_key());
    assert!(!config.has_search_key());

    let catalog = ResourceCatalog::from_config(&config.upstream);
    assert_eq!(
        catalog.get("installed-capacity").unwrap().url,
        "http://mirror.local/dashBoard/get_installed_capacity_list"
    );
    assert!(catalog.get("state-list").is_some());

    let redacted = config.to_redacted_toml();
    assert!(!redacted.contains("AIza-e2e"));
}

#[tokio::test]
async fn e2e_extra_keywords_open_the_gate() {
    let mut config = AppConfig::default();
    config.chat.extra_keywords = vec!["tariff".into()];

    let upstream = healthy_upstream();
    let provider = Arc::new(ScriptedProvider::text("Tariffs vary by state."));
    let proxy = DataProxy::new(
        ResourceCatalog::builtin(BASE),
        upstream,
        ResourceCaches::default(),
    );
    let orchestrator = ChatOrchestrator::from_config(
        &config,
        ContextAssembler::new(proxy.clone(), None),
        Some(provider.clone()),
    );
    let app = build_router(Arc::new(AppState::new(proxy, orchestrator)));

    let (status, body) = send(&app, chat("Delhi tariff order", false)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Tariffs vary by state.");
    assert_eq!(provider.calls(), 1);
}
