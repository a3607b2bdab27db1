//! Configuration structs with serde defaults and TOML loading.

pub mod defaults;

mod chat_config;
mod graph_config;
mod provider_config;

pub use chat_config::ChatConfig;
pub use graph_config::{CommunityEdgeAggregation, GraphConfig, WeightingMethod};
pub use provider_config::{EmbeddingConfig, GenerationConfig};

use serde::{Deserialize, Serialize};

use crate::errors::GraphError;

/// Umbrella configuration for the whole system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LitNetConfig {
    pub graph: GraphConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub chat: ChatConfig,
}

impl LitNetConfig {
    /// Parse from a TOML document. Missing sections fall back to defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, GraphError> {
        let config: LitNetConfig = toml::from_str(input).map_err(|e| GraphError::Config {
            reason: format!("failed to parse config: {e}"),
        })?;
        config.graph.validate()?;
        Ok(config)
    }
}
