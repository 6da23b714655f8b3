//! HTTP collaborators for Gargi.
//!
//! Everything that talks to the outside world lives here: the upstream
//! [`HttpFetcher`] used by the NPP proxy, the LLM providers, and the
//! Tavily web search client. Each implements a trait from `gargi_core`
//! so the rest of the workspace can be tested with mocks.

pub mod fetcher;
pub mod gemini;
pub mod openai_compat;
pub mod router;
pub mod tavily;

pub use fetcher::HttpFetcher;
pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
pub use tavily::TavilySearch;
