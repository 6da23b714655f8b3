//! Shared mocks for the chat pipeline tests.

use async_trait::async_trait;
use gargi_core::error::{ModelError, SearchError, UpstreamError};
use gargi_core::fetch::Fetcher;
use gargi_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use gargi_core::search::{SearchHit, SearchProvider};
use gargi_npp::ResourceCatalog;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serves canned JSON for catalog resources; anything else is a 503.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Value>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub const BASE: &'static str = "http://npp.test/dashBoard";

    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for the built-in resource `name`.
    pub fn with(mut self, name: &str, body: Value) -> Self {
        let catalog = ResourceCatalog::builtin(Self::BASE);
        let url = catalog
            .get(name)
            .map(|d| d.url.clone())
            .unwrap_or_else(|| panic!("not a built-in resource: {name}"));
        self.bodies.insert(url, body);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies.get(url).cloned().ok_or_else(|| UpstreamError::Status {
            url: url.to_string(),
            status: 503,
            body: String::new(),
        })
    }

    async fn fetch_text(&self, url: &str) -> Result<String, UpstreamError> {
        self.fetch_json(url).await.map(|v| v.to_string())
    }
}

/// Search mock returning fixed hits or a fixed error.
pub struct MockSearch {
    result: Result<Vec<SearchHit>, SearchError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_max_results: Mutex<Option<usize>>,
}

impl MockSearch {
    pub fn hits(hits: Vec<SearchHit>) -> Self {
        Self {
            result: Ok(hits),
            delay: None,
            calls: AtomicUsize::new(0),
            last_max_results: Mutex::new(None),
        }
    }

    pub fn failing(error: SearchError) -> Self {
        Self {
            result: Err(error),
            ..Self::hits(vec![])
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_max_results(&self) -> Option<usize> {
        *self.last_max_results.lock().unwrap()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    fn name(&self) -> &str {
        "mock_search"
    }

    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_max_results.lock().unwrap() = Some(max_results);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }
}

/// Model mock that answers every request with the same text (or error)
/// and records the requests it saw.
pub struct MockProvider {
    result: Result<String, ModelError>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn answering(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ModelError) -> Self {
        Self {
            result: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ModelError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);
        let text = self.result.clone()?;
        Ok(ProviderResponse {
            text,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model,
        })
    }
}

pub fn sample_capacity() -> Value {
    json!({
        "linechartforCapacity": [
            {"installed_capacity_thermal": "199877", "installed_capacity_hydro": "45399"},
            {
                "installed_capacity_thermal": "243280",
                "installed_capacity_hydro": "46928",
                "installed_capacity_nuclear": "8180",
                "installed_capacity_res": "162476"
            }
        ]
    })
}

pub fn sample_generation() -> Value {
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

pub fn sample_map() -> Value {
    json!({
        "headerMap": {
            "CP_OBJ": {"installed_capacity": "442000", "online_capacity": "301000"},
            "GN_OBJ": {"actual_generation": "4.8"}
        }
    })
}
