//! Best-effort context for the model prompt.
//!
//! Nothing in here fails: a resource that cannot be fetched leaves its
//! snapshot section empty, and a search that goes wrong yields
//! [`WebContext::empty`]. Each failure is logged with its kind.

pub mod assembler;
pub mod snapshot;
pub mod web;

pub use assembler::ContextAssembler;
pub use snapshot::render_snapshot;
pub use web::WebContext;
