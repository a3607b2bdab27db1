//! Structural retrieval over a selection's induced subgraph.
//!
//! Entity linking is lexical: canonical node names are matched into the
//! query longest-first, case-insensitively, with matched spans masked so
//! a contained shorter name cannot double-match. Traversal never leaves
//! the selection.

use std::collections::BTreeMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use litnet_core::constants::MAX_NEIGHBORS_PER_ENTITY;
use litnet_core::models::{NeighborSummary, PathSegment, Pmid, TermKey};
use litnet_network::relations::display_name;
use litnet_network::Selection;

#[derive(Debug, Clone)]
struct EdgeData {
    weight: f64,
    relations: Vec<String>,
    pmids: Vec<Pmid>,
}

pub struct GraphRetriever {
    graph: UnGraph<TermKey, EdgeData>,
    index_of: BTreeMap<String, NodeIndex>,
    /// Canonical names sorted longest first for entity linking.
    link_order: Vec<(String, NodeIndex)>,
    /// Shift that makes every edge weight non-negative for path costs.
    weight_shift: f64,
}

impl GraphRetriever {
    pub fn new(selection: &Selection) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index_of = BTreeMap::new();
        for node in selection.nodes.values() {
            let idx = graph.add_node(node.term.clone());
            index_of.insert(node.id.clone(), idx);
        }

        let min_weight = selection
            .edges
            .values()
            .map(|edge| edge.weight)
            .fold(0.0_f64, f64::min);
        let weight_shift = -min_weight;

        for edge in selection.edges.values() {
            let (Some(&a), Some(&b)) = (index_of.get(&edge.source), index_of.get(&edge.target))
            else {
                continue;
            };
            let mut relations: Vec<String> = edge
                .relations
                .values()
                .flatten()
                .map(|label| display_name(&label.relation_type))
                .collect();
            relations.sort();
            relations.dedup();
            graph.add_edge(
                a,
                b,
                EdgeData {
                    weight: edge.weight,
                    relations,
                    pmids: edge.pmids.iter().cloned().collect(),
                },
            );
        }

        let mut link_order: Vec<(String, NodeIndex)> = graph
            .node_indices()
            .map(|idx| (graph[idx].canonical.clone(), idx))
            .collect();
        link_order.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self {
            graph,
            index_of,
            link_order,
            weight_shift,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Resolve query text to selection entities. Longest names first;
    /// matched spans are masked so substrings cannot re-match. Unmatched
    /// text is simply omitted.
    pub fn link_entities(&self, query: &str) -> Vec<TermKey> {
        let mut haystack = query.to_lowercase();
        let mut linked = Vec::new();
        for (name, idx) in &self.link_order {
            if name.is_empty() {
                continue;
            }
            let mut matched = false;
            while let Some(pos) = haystack.find(name.as_str()) {
                matched = true;
                haystack.replace_range(pos..pos + name.len(), &" ".repeat(name.len()));
            }
            if matched {
                linked.push(self.graph[*idx].clone());
            }
        }
        linked.sort();
        linked
    }

    /// Direct neighbors of a term inside the selection, strongest edges
    /// first, capped.
    pub fn neighbors(&self, term: &TermKey) -> Vec<NeighborSummary> {
        let Some(&idx) = self.index_of.get(&term.to_string()) else {
            return Vec::new();
        };
        let mut summaries: Vec<NeighborSummary> = self
            .graph
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                NeighborSummary {
                    term: self.graph[other].clone(),
                    weight: edge.weight().weight,
                    relations: edge.weight().relations.clone(),
                    pmids: edge.weight().pmids.clone(),
                }
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then_with(|| a.term.cmp(&b.term))
        });
        summaries.truncate(MAX_NEIGHBORS_PER_ENTITY);
        summaries
    }

    /// Fewest-hops path between two terms, ties broken by stronger edges.
    /// `None` when either term is absent or no path exists; an absent
    /// path is evidence of disconnection, not an error.
    pub fn shortest_path(&self, from: &TermKey, to: &TermKey) -> Option<Vec<PathSegment>> {
        let &start = self.index_of.get(&from.to_string())?;
        let &goal = self.index_of.get(&to.to_string())?;
        if start == goal {
            return Some(Vec::new());
        }

        // Hop-dominant cost: each edge costs 1 plus a sub-unit penalty
        // that prefers stronger edges among equal-length paths.
        let (_, path) = petgraph::algo::astar(
            &self.graph,
            start,
            |node| node == goal,
            |edge| {
                let shifted = edge.weight().weight + self.weight_shift;
                let penalty = 1.0 / (2.0 + shifted);
                1.0 + penalty / (self.graph.edge_count() as f64 + 1.0)
            },
            |_| 0.0,
        )?;

        let mut segments = Vec::with_capacity(path.len().saturating_sub(1));
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let edge = self.graph.find_edge(a, b)?;
            let data = &self.graph[edge];
            segments.push(PathSegment {
                from: self.graph[a].clone(),
                to: self.graph[b].clone(),
                relations: data.relations.clone(),
                pmids: data.pmids.clone(),
            });
        }
        Some(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litnet_core::config::GraphConfig;
    use litnet_core::models::{Document, EntityType, Mention};
    use litnet_network::aggregator::CoOccurrenceTable;
    use litnet_network::snapshot::build_snapshot;
    use litnet_network::select;

    fn doc(pmid: &str, terms: &[(&str, EntityType)]) -> Document {
        let mut d = Document::new(pmid, format!("title {pmid}"));
        for (term, ty) in terms {
            d.mentions.push(Mention::new(*term, *ty));
        }
        d
    }

    fn retriever() -> GraphRetriever {
        // chain: il13 - asthma - dexamethasone, plus tp53 isolated from it
        let docs = vec![
            doc(
                "1",
                &[
                    ("IL13", EntityType::Gene),
                    ("asthma", EntityType::Disease),
                ],
            ),
            doc(
                "2",
                &[
                    ("asthma", EntityType::Disease),
                    ("dexamethasone", EntityType::Chemical),
                ],
            ),
            doc(
                "3",
                &[("TP53", EntityType::Gene), ("cancer", EntityType::Disease)],
            ),
        ];
        let snapshot =
            build_snapshot(&CoOccurrenceTable::ingest(&docs), &GraphConfig::default()).unwrap();
        let all_nodes: Vec<String> = snapshot.nodes.keys().cloned().collect();
        let selection = select(&snapshot, &all_nodes, &[]).unwrap();
        GraphRetriever::new(&selection)
    }

    #[test]
    fn links_entities_case_insensitively() {
        let r = retriever();
        let linked = r.link_entities("How does IL13 relate to Asthma?");
        assert_eq!(linked.len(), 2);
        assert!(linked.iter().any(|t| t.canonical == "il13"));
        assert!(linked.iter().any(|t| t.canonical == "asthma"));
    }

    #[test]
    fn unmatched_query_links_nothing() {
        let r = retriever();
        assert!(r.link_entities("completely unrelated question").is_empty());
    }

    #[test]
    fn neighbors_stay_inside_selection() {
        let r = retriever();
        let neighbors = r.neighbors(&TermKey::new(EntityType::Disease, "asthma"));
        assert_eq!(neighbors.len(), 2);
        let names: Vec<&str> = neighbors.iter().map(|n| n.term.canonical.as_str()).collect();
        assert!(names.contains(&"il13"));
        assert!(names.contains(&"dexamethasone"));
    }

    #[test]
    fn shortest_path_crosses_intermediate_node() {
        let r = retriever();
        let path = r
            .shortest_path(
                &TermKey::new(EntityType::Gene, "il13"),
                &TermKey::new(EntityType::Chemical, "dexamethasone"),
            )
            .unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].to.canonical, "asthma");
    }

    #[test]
    fn disconnected_terms_have_no_path() {
        let r = retriever();
        let path = r.shortest_path(
            &TermKey::new(EntityType::Gene, "il13"),
            &TermKey::new(EntityType::Gene, "tp53"),
        );
        assert!(path.is_none());
    }

    #[test]
    fn absent_term_has_no_neighbors() {
        let r = retriever();
        assert!(r
            .neighbors(&TermKey::new(EntityType::Gene, "brca1"))
            .is_empty());
    }
}
