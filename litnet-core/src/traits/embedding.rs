use crate::cancel::CancelToken;
use crate::errors::LitNetResult;

/// Embedding generation provider.
///
/// The token threads the caller's cancellation into the provider: remote
/// implementations check it before each attempt so an in-flight retry
/// loop can be abandoned mid-build. Purely local implementations may
/// ignore it.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str, cancel: &CancelToken) -> LitNetResult<Vec<f32>>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String], cancel: &CancelToken) -> LitNetResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
