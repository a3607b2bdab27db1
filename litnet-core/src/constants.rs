/// LitNet system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed response returned when neither vector nor graph retrieval
/// produced any evidence. The generation service is never called in
/// that case.
pub const INSUFFICIENT_EVIDENCE: &str =
    "I don't have enough evidence in the selected literature to answer that question.";

/// Hard cap on Louvain contraction passes.
pub const MAX_LOUVAIN_PASSES: usize = 10;

/// Maximum neighbors reported per query entity in graph evidence.
pub const MAX_NEIGHBORS_PER_ENTITY: usize = 10;

/// Maximum entity pairs examined for shortest paths per query.
pub const MAX_PATH_PAIRS: usize = 6;

/// Batch size for embedding calls during index construction.
pub const EMBED_BATCH_SIZE: usize = 32;

/// Version tag of the snapshot interchange format.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";
