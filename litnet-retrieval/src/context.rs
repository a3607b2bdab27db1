//! Prompt context assembly.
//!
//! Renders retrieved evidence into the bounded text block handed to the
//! generation service. Text evidence first (closest hits first), then
//! graph evidence, each item tagged with the PMIDs the model is allowed
//! to cite.

use litnet_core::config::ChatConfig;
use litnet_core::models::{GraphEvidence, TextEvidence};
use litnet_network::relations::is_directional;

/// Assemble the context block, respecting both the item and character
/// caps. Items are admitted whole; the first one that would overflow the
/// character budget stops assembly.
pub fn build_context(
    text_evidence: &[TextEvidence],
    graph_evidence: &[GraphEvidence],
    config: &ChatConfig,
) -> String {
    let mut sections: Vec<String> = Vec::new();
    let mut chars = 0_usize;
    let mut items = 0_usize;

    let mut push = |section: String, chars: &mut usize, items: &mut usize| -> bool {
        if *items >= config.max_context_items || *chars + section.len() > config.max_context_chars
        {
            return false;
        }
        *chars += section.len();
        *items += 1;
        sections.push(section);
        true
    };

    for hit in text_evidence {
        let section = format!(
            "[Text Evidence] PMID: {}\nAbstract: {}",
            hit.pmid, hit.text
        );
        if !push(section, &mut chars, &mut items) {
            break;
        }
    }

    for evidence in graph_evidence {
        let section = format!("[Graph Evidence] {}", render_graph_evidence(evidence));
        if !push(section, &mut chars, &mut items) {
            break;
        }
    }

    sections.join("\n\n")
}

fn render_graph_evidence(evidence: &GraphEvidence) -> String {
    match evidence {
        GraphEvidence::Neighbors { entity, neighbors } => {
            let mut out = format!("Entities connected to {entity} in the selected subgraph:");
            for n in neighbors {
                let relations = if n.relations.is_empty() {
                    "co-mentioned".to_string()
                } else {
                    n.relations.join(", ")
                };
                out.push_str(&format!(
                    "\n- {} ({}; weight {:.3}; PMIDs: {})",
                    n.term,
                    relations,
                    n.weight,
                    n.pmids.join(", ")
                ));
            }
            out
        }
        GraphEvidence::Path { from, to, segments } => {
            if segments.is_empty() {
                return format!("No connecting path between {from} and {to} in the selection.");
            }
            let mut out = format!("Path from {from} to {to}:");
            for segment in segments {
                let relations = if segment.relations.is_empty() {
                    "co-mentioned".to_string()
                } else {
                    segment.relations.join(", ")
                };
                // Directed arrow only when a relation actually implies one.
                let arrow = if segment.relations.iter().any(|r| is_directional(r)) {
                    "->"
                } else {
                    "--"
                };
                out.push_str(&format!(
                    "\n- {} {} {} ({}; PMIDs: {})",
                    segment.from,
                    arrow,
                    segment.to,
                    relations,
                    segment.pmids.join(", ")
                ));
            }
            out
        }
    }
}
