//! Annotated literature documents as delivered by the document provider.
//!
//! Entity tagging happens upstream: a `Document` arrives with mention
//! spans and optional externally extracted relations already attached,
//! and is immutable once ingested.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Pmid;

/// Semantic category of a tagged entity mention.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Gene,
    Disease,
    Chemical,
    Species,
    Variant,
    CellLine,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Gene => "gene",
            EntityType::Disease => "disease",
            EntityType::Chemical => "chemical",
            EntityType::Species => "species",
            EntityType::Variant => "variant",
            EntityType::CellLine => "cellline",
        };
        f.write_str(name)
    }
}

/// A raw entity mention inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Text span as it appears in the document.
    pub text: String,
    pub entity_type: EntityType,
    /// External standardized identifier (e.g. a MeSH id), when the
    /// annotator resolved one.
    pub standardized_id: Option<String>,
    /// Label associated with `standardized_id`, used for synonym collapsing.
    pub standardized_label: Option<String>,
}

impl Mention {
    pub fn new(text: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            text: text.into(),
            entity_type,
            standardized_id: None,
            standardized_label: None,
        }
    }

    /// Attach a standardized identifier and its label.
    pub fn with_standardized(
        mut self,
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.standardized_id = Some(id.into());
        self.standardized_label = Some(label.into());
        self
    }
}

/// An externally extracted relation between two mentions of one document.
///
/// Confidence scores are pass-through: LitNet filters by threshold but
/// never re-estimates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationAnnotation {
    pub subject: Mention,
    pub object: Mention,
    /// Raw relation type, e.g. "inhibits" or "associated_with".
    pub relation_type: String,
    /// Externally assigned confidence in [0, 1].
    pub confidence: f64,
    /// Supporting sentence or phrase from the document.
    pub evidence: String,
}

/// One annotated literature document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pmid: Pmid,
    pub title: String,
    pub abstract_text: Option<String>,
    pub year: Option<u16>,
    /// Ordered entity mentions as tagged by the annotation source.
    pub mentions: Vec<Mention>,
    /// Externally extracted relations, possibly empty.
    #[serde(default)]
    pub relations: Vec<RelationAnnotation>,
}

impl Document {
    pub fn new(pmid: impl Into<Pmid>, title: impl Into<String>) -> Self {
        Self {
            pmid: pmid.into(),
            title: title.into(),
            abstract_text: None,
            year: None,
            mentions: Vec::new(),
            relations: Vec::new(),
        }
    }
}
