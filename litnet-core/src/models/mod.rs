//! Data models shared across the workspace.

pub mod chat;
pub mod document;
pub mod evidence;
pub mod term;

pub use chat::{AskOutcome, ChatMessage, ChatTurn, Role};
pub use document::{Document, EntityType, Mention, RelationAnnotation};
pub use evidence::{GraphEvidence, NeighborSummary, PathSegment, TextEvidence};
pub use term::TermKey;

/// PubMed identifier of a literature document.
pub type Pmid = String;
