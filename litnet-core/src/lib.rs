//! # litnet-core
//!
//! Foundation crate for the LitNet literature-network system.
//! Defines all models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cancel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancel::CancelToken;
pub use config::{GraphConfig, LitNetConfig, WeightingMethod};
pub use errors::{LitNetError, LitNetResult};
pub use models::{Document, EntityType, Mention, Pmid, TermKey};
