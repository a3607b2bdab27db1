//! Provider construction from configuration.

use litnet_core::config::EmbeddingConfig;
use litnet_core::errors::{GraphError, LitNetResult};
use litnet_core::traits::IEmbeddingProvider;

use crate::local::HashedTfProvider;
use crate::remote::RemoteEmbeddingProvider;

/// Build the embedding provider named by `config.provider`.
pub fn create_embedding_provider(
    config: &EmbeddingConfig,
) -> LitNetResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "remote" => {
            let provider = RemoteEmbeddingProvider::new(config)?;
            tracing::info!(model = %config.model, endpoint = %config.endpoint, "using remote embeddings");
            Ok(Box::new(provider))
        }
        "local" => {
            tracing::info!(dimensions = config.dimensions, "using local hashed-TF embeddings");
            Ok(Box::new(HashedTfProvider::new(config.dimensions)))
        }
        other => Err(GraphError::Config {
            reason: format!("unknown embedding provider \"{other}\""),
        }
        .into()),
    }
}
