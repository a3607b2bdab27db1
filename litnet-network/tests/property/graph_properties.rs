//! Property tests for the network pipeline.

use std::collections::BTreeSet;

use proptest::prelude::*;

use litnet_core::config::GraphConfig;
use litnet_core::models::{Document, EntityType, Mention};
use litnet_network::aggregator::CoOccurrenceTable;
use litnet_network::community::{assign, Link};
use litnet_network::snapshot::build_snapshot;
use litnet_network::weighting::npmi;

fn make_docs(term_sets: &[BTreeSet<usize>]) -> Vec<Document> {
    term_sets
        .iter()
        .enumerate()
        .map(|(i, terms)| {
            let mut doc = Document::new(format!("{}", 1000 + i), format!("title {i}"));
            for &t in terms {
                doc.mentions
                    .push(Mention::new(format!("t{t}"), EntityType::Gene));
            }
            doc
        })
        .collect()
}

fn doc_strategy() -> impl Strategy<Value = Vec<BTreeSet<usize>>> {
    prop::collection::vec(prop::collection::btree_set(0_usize..6, 0..5), 1..12)
}

proptest! {
    #[test]
    fn aggregation_is_order_invariant(term_sets in doc_strategy()) {
        let docs = make_docs(&term_sets);
        let shuffled = {
            let mut rev = docs.clone();
            rev.reverse();
            rev
        };
        let forward = CoOccurrenceTable::ingest(&docs);
        let backward = CoOccurrenceTable::ingest(&shuffled);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn sequential_and_parallel_ingestion_agree(term_sets in doc_strategy()) {
        let docs = make_docs(&term_sets);
        let parallel = CoOccurrenceTable::ingest(&docs);
        let mut sequential = CoOccurrenceTable::new();
        for doc in &docs {
            sequential.add_document(doc);
        }
        prop_assert_eq!(parallel, sequential);
    }

    #[test]
    fn count_bounded_by_marginals(term_sets in doc_strategy()) {
        let table = CoOccurrenceTable::ingest(&make_docs(&term_sets));
        for (pair, entry) in &table.pairs {
            let df_a = table.terms[&pair.a].doc_frequency;
            let df_b = table.terms[&pair.b].doc_frequency;
            prop_assert!(entry.count >= 1);
            prop_assert!(entry.count <= df_a.min(df_b));
        }
    }

    #[test]
    fn npmi_bounded_and_symmetric(
        n_docs in 1_u32..10_000,
        n_x in 1_u32..10_000,
        n_y in 1_u32..10_000,
        n_xy in 1_u32..10_000,
    ) {
        let n_x = n_x.min(n_docs);
        let n_y = n_y.min(n_docs);
        let n_xy = n_xy.min(n_x).min(n_y);
        let forward = npmi(n_x, n_y, n_xy, n_docs);
        let backward = npmi(n_y, n_x, n_xy, n_docs);
        prop_assert!((-1.0..=1.0).contains(&forward));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn pruning_is_monotonic(term_sets in doc_strategy(), lo in 0.0_f64..0.5, delta in 0.0_f64..0.5) {
        let table = CoOccurrenceTable::ingest(&make_docs(&term_sets));
        let loose = build_snapshot(&table, &GraphConfig { weight_cutoff: lo, ..Default::default() }).unwrap();
        let strict = build_snapshot(&table, &GraphConfig { weight_cutoff: lo + delta, ..Default::default() }).unwrap();
        prop_assert!(strict.edges.len() <= loose.edges.len());
        for id in strict.edges.keys() {
            prop_assert!(loose.edges.contains_key(id));
        }
    }

    #[test]
    fn community_assignment_is_deterministic(
        raw_links in prop::collection::vec((0_usize..12, 0_usize..12, 0.01_f64..1.0), 0..30)
    ) {
        let links: Vec<Link> = raw_links
            .iter()
            .map(|&(a, b, weight)| Link { a, b, weight })
            .collect();
        let first = assign(12, &links, 10);
        for _ in 0..3 {
            prop_assert_eq!(assign(12, &links, 10), first.clone());
        }
        // Every node lands somewhere, ids are compact.
        let max = first.iter().max().copied().unwrap_or(0);
        let distinct: BTreeSet<usize> = first.iter().copied().collect();
        prop_assert_eq!(distinct.len(), max + 1);
    }

    #[test]
    fn snapshot_build_is_reproducible(term_sets in doc_strategy()) {
        let table = CoOccurrenceTable::ingest(&make_docs(&term_sets));
        let config = GraphConfig::default();
        let first = build_snapshot(&table, &config).unwrap();
        let second = build_snapshot(&table, &config).unwrap();
        prop_assert_eq!(first.communities, second.communities);
        prop_assert_eq!(first.edges, second.edges);
    }
}
