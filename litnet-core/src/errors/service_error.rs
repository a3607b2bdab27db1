/// External service (embedding / generation) errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{provider} request failed: {reason}")]
    Provider { provider: String, reason: String },

    /// The request exceeded its deadline. Distinct from `Provider` so
    /// callers can tell a slow service from a broken one.
    #[error("{provider} request timed out after {elapsed_ms}ms")]
    Timeout { provider: String, elapsed_ms: u64 },

    #[error("{provider} request cancelled")]
    Cancelled { provider: String },

    #[error("{provider} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        provider: String,
        attempts: u32,
        last_error: String,
    },
}
