/// Graph pipeline errors (configuration, identifiers, ingestion).
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("edge not found: {id}")]
    EdgeNotFound { id: String },

    #[error("selection is empty: at least one node or edge id is required")]
    EmptySelection,

    #[error("snapshot interchange: {reason}")]
    Interchange { reason: String },
}
