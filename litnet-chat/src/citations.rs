//! PMID citation extraction and grounding.
//!
//! Answers cite sources as `[PMID:12345678]`. The displayed source list
//! is exactly the intersection of what the answer text cites and what
//! retrieval actually provided: fabricated PMIDs are dropped, and
//! retrieved-but-uncited documents are not claimed as sources.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use litnet_core::models::Pmid;

fn pmid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bPMID[:\s]*(\d{1,9})\b").unwrap_or_else(|_| unreachable!())
    })
}

/// All PMIDs textually cited in an answer.
pub fn extract_cited(text: &str) -> BTreeSet<Pmid> {
    pmid_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Cited ∩ retrieved, in ascending order.
pub fn grounded_sources(text: &str, retrieved: &BTreeSet<Pmid>) -> Vec<Pmid> {
    extract_cited(text)
        .intersection(retrieved)
        .cloned()
        .collect()
}
