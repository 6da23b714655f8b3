//! # Gargi Core
//!
//! Domain types, collaborator traits, and error definitions for the Gargi
//! energy gateway. This crate has **no HTTP or runtime dependencies**; it
//! defines the model that every other crate implements against.
//!
//! ## Collaborators
//!
//! Each external service is a trait here, with real implementations in
//! `gargi-providers`:
//! - [`Fetcher`]: upstream energy-data API (GET + JSON/text)
//! - [`Provider`]: the language model (single-shot text completion)
//! - [`SearchProvider`]: the optional web-search service
//!
//! Swapping in mock implementations is how the rest of the workspace is tested.

pub mod chat;
pub mod error;
pub mod fetch;
pub mod provider;
pub mod search;
pub mod snapshot;

// Re-export key types at crate root for ergonomics
pub use chat::{ChatRequest, ChatResponse};
pub use error::{Error, ModelError, ProxyError, Result, SearchError, UpstreamError};
pub use fetch::Fetcher;
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use search::{SearchHit, SearchProvider};
pub use snapshot::{CapacityFigures, EnergySnapshot, GenerationFigures, RealtimeFigures};
