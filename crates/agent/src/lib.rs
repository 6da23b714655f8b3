//! Gargi, the energy-analyst chat pipeline.
//!
//! A chat request moves through a fixed sequence:
//!
//! 1. **Gate**: a keyword check rejects off-topic questions with a canned
//!    reply before any network call
//! 2. **Context**: a live NPP snapshot (and optionally web search
//!    snippets) is gathered, best effort
//! 3. **Model**: persona, question and context go to the model as a single
//!    prompt
//! 4. **Respond**: the answer is returned with the sources that fed it

pub mod context;
pub mod gate;
pub mod orchestrator;
pub mod persona;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use context::{ContextAssembler, WebContext, render_snapshot};
pub use gate::DomainGate;
pub use orchestrator::{ChatOrchestrator, ChatState};
