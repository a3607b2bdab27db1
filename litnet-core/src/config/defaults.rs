//! Default configuration values.

pub const DEFAULT_WEIGHT_CUTOFF: f64 = 0.0;
pub const DEFAULT_MIN_DOC_FREQUENCY: u32 = 2;
pub const DEFAULT_RELATION_CONFIDENCE_CUTOFF: f64 = 0.5;
pub const DEFAULT_MAX_LOUVAIN_PASSES: usize = 10;

pub const DEFAULT_EMBEDDING_PROVIDER: &str = "local";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub const DEFAULT_MAX_HISTORY_TURNS: usize = 10;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MAX_CONTEXT_ITEMS: usize = 20;
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 24_000;
