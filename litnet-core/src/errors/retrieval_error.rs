/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// The selection yielded no retrievable evidence; retrieval fails
    /// closed instead of falling back to an unscoped corpus.
    #[error("no retrievable evidence for selection: {reason}")]
    EmptyEvidence { reason: String },

    #[error("an index build is already in flight for selection {selection_id}")]
    BuildInFlight { selection_id: String },

    #[error("session not found: {id}")]
    SessionNotFound { id: String },
}
