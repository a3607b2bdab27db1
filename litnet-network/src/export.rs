//! Versioned JSON interchange for snapshots.
//!
//! Exports are lossless: nodes, edges with their relation labels and
//! provenance, community structure, and the build parameters all round
//! trip. Imports reject documents with a different format version.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use litnet_core::config::WeightingMethod;
use litnet_core::constants::EXPORT_FORMAT_VERSION;
use litnet_core::errors::GraphError;

use crate::community::{Community, CommunityEdge};
use crate::snapshot::{Edge, GraphSnapshot, Node};

/// The on-disk interchange document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotExport {
    pub format_version: String,
    pub weighting_method: WeightingMethod,
    pub weight_cutoff: f64,
    pub num_documents: u32,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub communities: Vec<Community>,
    pub community_edges: Vec<CommunityEdge>,
}

impl SnapshotExport {
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        Self {
            format_version: EXPORT_FORMAT_VERSION.to_string(),
            weighting_method: snapshot.weighting_method,
            weight_cutoff: snapshot.weight_cutoff,
            num_documents: snapshot.num_documents,
            nodes: snapshot.nodes.values().cloned().collect(),
            edges: snapshot.edges.values().cloned().collect(),
            communities: snapshot.communities.clone(),
            community_edges: snapshot.community_edges.clone(),
        }
    }

    pub fn into_snapshot(self) -> Result<GraphSnapshot, GraphError> {
        if self.format_version != EXPORT_FORMAT_VERSION {
            return Err(GraphError::Interchange {
                reason: format!(
                    "unsupported format version {} (expected {EXPORT_FORMAT_VERSION})",
                    self.format_version
                ),
            });
        }
        let nodes: BTreeMap<_, _> = self
            .nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        let edges: BTreeMap<_, _> = self
            .edges
            .into_iter()
            .map(|edge| (edge.id.clone(), edge))
            .collect();
        Ok(GraphSnapshot {
            nodes,
            edges,
            communities: self.communities,
            community_edges: self.community_edges,
            weighting_method: self.weighting_method,
            weight_cutoff: self.weight_cutoff,
            num_documents: self.num_documents,
        })
    }
}

pub fn to_json(snapshot: &GraphSnapshot) -> Result<String, GraphError> {
    serde_json::to_string_pretty(&SnapshotExport::from_snapshot(snapshot)).map_err(|e| {
        GraphError::Interchange {
            reason: format!("serialization failed: {e}"),
        }
    })
}

pub fn from_json(json: &str) -> Result<GraphSnapshot, GraphError> {
    let export: SnapshotExport =
        serde_json::from_str(json).map_err(|e| GraphError::Interchange {
            reason: format!("parse failed: {e}"),
        })?;
    export.into_snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::CoOccurrenceTable;
    use crate::snapshot::build_snapshot;
    use litnet_core::config::GraphConfig;
    use litnet_core::models::{Document, EntityType, Mention, RelationAnnotation};

    fn sample_snapshot() -> GraphSnapshot {
        let mut docs = Vec::new();
        for (pmid, terms) in [("1", vec!["a", "b"]), ("2", vec!["b", "c"])] {
            let mut d = Document::new(pmid, format!("title {pmid}"));
            for term in terms {
                d.mentions.push(Mention::new(term, EntityType::Gene));
            }
            docs.push(d);
        }
        docs[0].relations.push(RelationAnnotation {
            subject: Mention::new("a", EntityType::Gene),
            object: Mention::new("b", EntityType::Gene),
            relation_type: "inhibits".into(),
            confidence: 0.9,
            evidence: "A inhibits B.".into(),
        });
        build_snapshot(&CoOccurrenceTable::ingest(&docs), &GraphConfig::default()).unwrap()
    }

    #[test]
    fn round_trip_is_lossless() {
        let snapshot = sample_snapshot();
        let json = to_json(&snapshot).unwrap();
        let back = from_json(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn relation_labels_survive_round_trip() {
        let snapshot = sample_snapshot();
        let back = from_json(&to_json(&snapshot).unwrap()).unwrap();
        let edge = &back.edges["gene:a|gene:b"];
        assert_eq!(edge.relations["1"].iter().next().unwrap().relation_type, "inhibits");
    }

    #[test]
    fn unknown_version_is_rejected() {
        let snapshot = sample_snapshot();
        let mut export = SnapshotExport::from_snapshot(&snapshot);
        export.format_version = "99.0".into();
        let json = serde_json::to_string(&export).unwrap();
        let result = from_json(&json);
        assert!(matches!(result, Err(GraphError::Interchange { .. })));
    }

    #[test]
    fn garbage_json_is_an_interchange_error() {
        assert!(matches!(
            from_json("{not json"),
            Err(GraphError::Interchange { .. })
        ));
    }
}
