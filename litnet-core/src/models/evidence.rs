//! Retrieved evidence records.
//!
//! Fixed tagged records with explicit fields (not open attribute maps) so
//! the grounding invariants stay checkable.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Pmid, TermKey};

/// One vector-retrieval hit: an abstract with its raw embedding distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEvidence {
    pub pmid: Pmid,
    pub text: String,
    /// Raw cosine distance to the query (lower is closer).
    pub distance: f32,
}

/// A neighbor of a query entity inside the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborSummary {
    pub term: TermKey,
    pub weight: f64,
    /// Display names of relation types on the connecting edge.
    pub relations: Vec<String>,
    pub pmids: Vec<Pmid>,
}

/// One hop of a shortest path between two query entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub from: TermKey,
    pub to: TermKey,
    pub relations: Vec<String>,
    pub pmids: Vec<Pmid>,
}

/// Structural context retrieved from the selection's induced subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphEvidence {
    /// Direct neighbors of one resolved query entity.
    Neighbors {
        entity: TermKey,
        neighbors: Vec<NeighborSummary>,
    },
    /// Shortest path between two resolved query entities.
    Path {
        from: TermKey,
        to: TermKey,
        segments: Vec<PathSegment>,
    },
}

impl GraphEvidence {
    /// All PMIDs referenced by this piece of evidence.
    pub fn pmids(&self) -> BTreeSet<Pmid> {
        let mut out = BTreeSet::new();
        match self {
            GraphEvidence::Neighbors { neighbors, .. } => {
                for n in neighbors {
                    out.extend(n.pmids.iter().cloned());
                }
            }
            GraphEvidence::Path { segments, .. } => {
                for s in segments {
                    out.extend(s.pmids.iter().cloned());
                }
            }
        }
        out
    }
}
