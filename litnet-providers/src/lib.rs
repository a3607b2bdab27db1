//! External service clients.
//!
//! Embedding and generation run against OpenAI-compatible HTTP endpoints
//! through blocking clients with per-request timeouts, wrapped in bounded
//! retry. A deterministic local embedding provider keeps the rest of the
//! system testable without a network.

pub mod factory;
pub mod generation;
pub mod local;
pub mod remote;
pub mod retry;

pub use factory::create_embedding_provider;
pub use generation::RemoteGenerationService;
pub use local::HashedTfProvider;
pub use remote::RemoteEmbeddingProvider;
pub use retry::retry_with_backoff;
