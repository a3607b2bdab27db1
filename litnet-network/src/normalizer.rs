//! Mention normalization.
//!
//! Maps raw mention text to a canonical [`TermKey`]. Standardized labels
//! from the annotation source win over surface text so that synonyms of
//! the same concept collapse into one node. Surface text falls back to
//! lowercasing plus conservative plural stripping.

use litnet_core::models::{Mention, TermKey};

/// Normalize a mention into its canonical term, or `None` when the
/// mention carries no usable text.
pub fn normalize(mention: &Mention) -> Option<TermKey> {
    if mention.standardized_id.is_some() {
        if let Some(label) = &mention.standardized_label {
            let canonical = collapse_whitespace(&label.to_lowercase());
            if !canonical.is_empty() {
                return Some(TermKey::new(mention.entity_type, canonical));
            }
        }
    }
    let lowered = collapse_whitespace(&mention.text.to_lowercase());
    if lowered.is_empty() {
        return None;
    }
    Some(TermKey::new(mention.entity_type, singularize(&lowered)))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Conservative plural stripping. Only two safe rules: `-ies` -> `-y`,
/// and a trailing `s` on words long enough that stripping cannot merge
/// unrelated roots. Latin/Greek endings (`-ss`, `-us`, `-is`) are left
/// alone.
fn singularize(text: &str) -> String {
    if let Some(stem) = text.strip_suffix("ies") {
        if text.len() > 4 {
            return format!("{stem}y");
        }
    }
    if text.len() > 3
        && text.ends_with('s')
        && !text.ends_with("ss")
        && !text.ends_with("us")
        && !text.ends_with("is")
    {
        return text[..text.len() - 1].to_string();
    }
    text.to_string()
}
