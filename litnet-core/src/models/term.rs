//! Canonical term identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::EntityType;

/// Canonical identity of an entity after normalization.
///
/// A term is keyed by (entity type, canonical text): the same text with a
/// different type is a different term. The derived `Ord` gives every
/// iteration over terms a fixed, reproducible order.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TermKey {
    pub entity_type: EntityType,
    pub canonical: String,
}

impl TermKey {
    pub fn new(entity_type: EntityType, canonical: impl Into<String>) -> Self {
        Self {
            entity_type,
            canonical: canonical.into(),
        }
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.canonical)
    }
}
