//! Relation-type vocabulary.
//!
//! Externally extracted relation labels arrive in free-ish form
//! ("inhibition", "INHIBITS", "interacts with"). This module maps them to
//! a canonical vocabulary and classifies direction, which the evidence
//! formatter uses when rendering graph context.

/// Relations where A -> B implies direction.
const DIRECTIONAL: &[&str] = &[
    "inhibits",
    "activates",
    "increases",
    "decreases",
    "upregulates",
    "downregulates",
    "regulates",
    "induces",
    "suppresses",
    "represses",
    "enhances",
    "promotes",
    "stimulates",
    "blocks",
    "phosphorylates",
    "methylates",
    "acetylates",
    "ubiquitinates",
    "modifies",
    "causes",
    "leads_to",
    "results_in",
    "triggers",
    "treats",
    "prevents",
    "cures",
    "ameliorates",
    "metabolizes",
    "synthesizes",
    "degrades",
    "catalyzes",
    "expresses",
    "transcribes",
    "translates",
];

/// Bidirectional or non-directional relations.
const SYMMETRIC: &[&str] = &[
    "interacts_with",
    "associated_with",
    "co_occurs_with",
    "correlates_with",
    "binds_to",
    "complexes_with",
    "related_to",
    "co-mention",
];

/// Common surface variants mapped to canonical forms.
const NORMALIZATIONS: &[(&str, &str)] = &[
    ("inhibit", "inhibits"),
    ("inhibition", "inhibits"),
    ("inhibitor", "inhibits"),
    ("activate", "activates"),
    ("activation", "activates"),
    ("activator", "activates"),
    ("increase", "increases"),
    ("increasing", "increases"),
    ("decrease", "decreases"),
    ("decreasing", "decreases"),
    ("regulate", "regulates"),
    ("regulation", "regulates"),
    ("regulator", "regulates"),
    ("upregulate", "upregulates"),
    ("upregulation", "upregulates"),
    ("downregulate", "downregulates"),
    ("downregulation", "downregulates"),
    ("induce", "induces"),
    ("induction", "induces"),
    ("suppress", "suppresses"),
    ("suppression", "suppresses"),
    ("enhance", "enhances"),
    ("enhancement", "enhances"),
    ("promote", "promotes"),
    ("promotion", "promotes"),
    ("phosphorylate", "phosphorylates"),
    ("phosphorylation", "phosphorylates"),
    ("treat", "treats"),
    ("treatment", "treats"),
    ("cause", "causes"),
    ("interact", "interacts_with"),
    ("interaction", "interacts_with"),
    ("associate", "associated_with"),
    ("association", "associated_with"),
    ("bind", "binds_to"),
    ("binding", "binds_to"),
];

/// Lowercase, underscore, and map surface variants to canonical forms.
/// Unknown types pass through normalized but unmapped.
pub fn normalize_relation_type(relation_type: &str) -> String {
    let normalized = relation_type.trim().to_lowercase().replace(' ', "_");
    for (variant, canonical) in NORMALIZATIONS {
        if *variant == normalized {
            return (*canonical).to_string();
        }
    }
    normalized
}

pub fn is_directional(relation_type: &str) -> bool {
    let normalized = normalize_relation_type(relation_type);
    DIRECTIONAL.contains(&normalized.as_str())
}

pub fn is_symmetric(relation_type: &str) -> bool {
    let normalized = normalize_relation_type(relation_type);
    SYMMETRIC.contains(&normalized.as_str())
}

/// Human-readable form, underscores back to spaces.
pub fn display_name(relation_type: &str) -> String {
    normalize_relation_type(relation_type).replace('_', " ")
}
