//! Hybrid retrieval over one subgraph selection.
//!
//! Each selection gets its own ephemeral vector index over the abstracts
//! its PMIDs reach, built once and owned by the session that asked for it.
//! Graph retrieval walks the selection's induced subgraph for neighbor and
//! path evidence. Nothing here touches snapshot state after construction.

pub mod context;
pub mod graph_retriever;
pub mod guard;
pub mod index;

pub use context::build_context;
pub use graph_retriever::GraphRetriever;
pub use guard::BuildGuard;
pub use index::{IndexBuilder, VectorIndex};
