use serde::{Deserialize, Serialize};

use crate::errors::GraphError;

use super::defaults;

/// Edge weighting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightingMethod {
    /// count / max count, mapped to [0, 1].
    Frequency,
    /// Normalized pointwise mutual information, in [-1, 1].
    Npmi,
}

/// How representative inter-community edges aggregate crossing weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityEdgeAggregation {
    Max,
    Sum,
}

/// Graph construction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub weighting_method: WeightingMethod,
    /// Edges below this weight are excluded from the snapshot. Range
    /// depends on the weighting method: [0, 1] for frequency, [-1, 1]
    /// for NPMI.
    pub weight_cutoff: f64,
    /// Keep nodes with no surviving edges.
    pub retain_isolated: bool,
    pub detect_communities: bool,
    pub community_edge_aggregation: CommunityEdgeAggregation,
    pub max_louvain_passes: usize,
    /// Terms with a document frequency below this clamp their NPMI
    /// values to at most 0 (low-support guard).
    pub min_doc_frequency: u32,
    /// Relation labels with a lower confidence are dropped at snapshot
    /// build time.
    pub relation_confidence_cutoff: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            weighting_method: WeightingMethod::Frequency,
            weight_cutoff: defaults::DEFAULT_WEIGHT_CUTOFF,
            retain_isolated: false,
            detect_communities: true,
            community_edge_aggregation: CommunityEdgeAggregation::Max,
            max_louvain_passes: defaults::DEFAULT_MAX_LOUVAIN_PASSES,
            min_doc_frequency: defaults::DEFAULT_MIN_DOC_FREQUENCY,
            relation_confidence_cutoff: defaults::DEFAULT_RELATION_CONFIDENCE_CUTOFF,
        }
    }
}

impl GraphConfig {
    /// Validate ranges. Called by every snapshot build.
    pub fn validate(&self) -> Result<(), GraphError> {
        let (lo, hi) = match self.weighting_method {
            WeightingMethod::Frequency => (0.0, 1.0),
            WeightingMethod::Npmi => (-1.0, 1.0),
        };
        if !self.weight_cutoff.is_finite() || self.weight_cutoff < lo || self.weight_cutoff > hi
        {
            return Err(GraphError::Config {
                reason: format!(
                    "weight_cutoff {} out of range [{lo}, {hi}] for {:?}",
                    self.weight_cutoff, self.weighting_method
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.relation_confidence_cutoff) {
            return Err(GraphError::Config {
                reason: format!(
                    "relation_confidence_cutoff {} out of range [0, 1]",
                    self.relation_confidence_cutoff
                ),
            });
        }
        if self.max_louvain_passes == 0 {
            return Err(GraphError::Config {
                reason: "max_louvain_passes must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
