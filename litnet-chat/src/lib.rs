//! Grounded question answering over a subgraph selection.
//!
//! A session binds one selection to one vector index and one graph
//! retriever. The synthesizer asks the generation service only when
//! retrieval actually produced evidence, and the displayed source list is
//! the intersection of what the answer cites and what was retrieved.

pub mod citations;
pub mod engine;
pub mod manager;
pub mod session;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::LitNetEngine;
pub use manager::SessionManager;
pub use session::ChatSession;
