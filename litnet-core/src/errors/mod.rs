//! Error taxonomy.
//!
//! One enum per subsystem, aggregated into [`LitNetError`]. Timeout and
//! cancellation are distinct variants, never folded into generic provider
//! failures.

mod graph_error;
mod retrieval_error;
mod service_error;

pub use graph_error::GraphError;
pub use retrieval_error::RetrievalError;
pub use service_error::ServiceError;

/// Top-level error type for all LitNet operations.
#[derive(Debug, thiserror::Error)]
pub enum LitNetError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type LitNetResult<T> = Result<T, LitNetError>;
