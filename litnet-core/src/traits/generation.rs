use crate::cancel::CancelToken;
use crate::errors::LitNetResult;
use crate::models::ChatMessage;

/// Text generation service (chat completion).
///
/// Implementations must honor `cancel` and their configured timeout:
/// cancellation surfaces as `ServiceError::Cancelled`, deadline overruns
/// as `ServiceError::Timeout`.
pub trait IGenerationService: Send + Sync {
    /// Complete the conversation and return the assistant text.
    fn complete(&self, messages: &[ChatMessage], cancel: &CancelToken) -> LitNetResult<String>;

    /// Human-readable service name.
    fn name(&self) -> &str;
}
