//! Co-occurrence network pipeline.
//!
//! Annotated documents flow through four stages: the normalizer collapses
//! raw mentions into canonical terms, the aggregator counts document-level
//! co-occurrence, the weighting engine scores pairs (frequency or NPMI),
//! and the community detector groups the surviving graph. The result is an
//! immutable [`GraphSnapshot`] that downstream retrieval selects subgraphs
//! from.

pub mod aggregator;
pub mod community;
pub mod export;
pub mod normalizer;
pub mod relations;
pub mod selection;
pub mod snapshot;
pub mod weighting;

pub use aggregator::{CoOccurrenceTable, PairEntry, PairKey, RelationLabel, TermStats};
pub use community::{Community, CommunityEdge};
pub use export::SnapshotExport;
pub use selection::{select, Selection};
pub use snapshot::{build_snapshot, Edge, EdgeId, GraphSnapshot, Node, NodeId};
