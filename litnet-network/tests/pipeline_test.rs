//! End-to-end pipeline coverage: documents in, snapshot out.

use litnet_core::config::{GraphConfig, WeightingMethod};
use litnet_core::models::{Document, EntityType, Mention, TermKey};
use litnet_network::aggregator::{CoOccurrenceTable, PairKey};
use litnet_network::snapshot::build_snapshot;
use litnet_network::{export, select};

fn doc(pmid: &str, terms: &[&str]) -> Document {
    let mut d = Document::new(pmid, format!("title {pmid}"));
    for term in terms {
        d.mentions.push(Mention::new(*term, EntityType::Gene));
    }
    d
}

fn gene(name: &str) -> TermKey {
    TermKey::new(EntityType::Gene, name)
}

/// doc1:{A,B}, doc2:{B,C}, doc3:{A,B,C}.
fn three_docs() -> Vec<Document> {
    vec![
        doc("1", &["a", "b"]),
        doc("2", &["b", "c"]),
        doc("3", &["a", "b", "c"]),
    ]
}

#[test]
fn three_document_counting_scenario() {
    let table = CoOccurrenceTable::ingest(&three_docs());

    assert_eq!(table.num_documents, 3);
    assert_eq!(table.pairs[&PairKey::new(gene("a"), gene("b"))].count, 2);
    assert_eq!(table.pairs[&PairKey::new(gene("b"), gene("c"))].count, 2);
    assert_eq!(table.pairs[&PairKey::new(gene("a"), gene("c"))].count, 1);
    assert_eq!(table.terms[&gene("a")].doc_frequency, 2);
    assert_eq!(table.terms[&gene("b")].doc_frequency, 3);
    assert_eq!(table.terms[&gene("c")].doc_frequency, 2);
}

#[test]
fn frequency_snapshot_weights_are_normalized() {
    let table = CoOccurrenceTable::ingest(&three_docs());
    let snapshot = build_snapshot(&table, &GraphConfig::default()).unwrap();

    assert_eq!(snapshot.edges["gene:a|gene:b"].weight, 1.0);
    assert_eq!(snapshot.edges["gene:a|gene:c"].weight, 0.5);
    for edge in snapshot.edges.values() {
        assert!((0.0..=1.0).contains(&edge.weight));
    }
}

#[test]
fn npmi_snapshot_respects_bounds() {
    let table = CoOccurrenceTable::ingest(&three_docs());
    let config = GraphConfig {
        weighting_method: WeightingMethod::Npmi,
        weight_cutoff: -1.0,
        ..Default::default()
    };
    let snapshot = build_snapshot(&table, &config).unwrap();
    assert_eq!(snapshot.edges.len(), 3);
    for edge in snapshot.edges.values() {
        assert!((-1.0..=1.0).contains(&edge.weight));
    }
}

#[test]
fn edge_pmids_track_supporting_documents() {
    let table = CoOccurrenceTable::ingest(&three_docs());
    let snapshot = build_snapshot(&table, &GraphConfig::default()).unwrap();
    let ab = &snapshot.edges["gene:a|gene:b"];
    assert_eq!(ab.pmids, ["1", "3"].iter().map(|s| s.to_string()).collect());
}

#[test]
fn selection_flows_from_built_snapshot() {
    let table = CoOccurrenceTable::ingest(&three_docs());
    let snapshot = build_snapshot(&table, &GraphConfig::default()).unwrap();
    let selection = select(&snapshot, &["gene:a".into()], &[]).unwrap();
    assert!(selection.pmids.contains("1"));
    assert!(selection.pmids.contains("3"));
}

#[test]
fn snapshot_survives_export_import() {
    let table = CoOccurrenceTable::ingest(&three_docs());
    let snapshot = build_snapshot(&table, &GraphConfig::default()).unwrap();
    let restored = export::from_json(&export::to_json(&snapshot).unwrap()).unwrap();
    assert_eq!(snapshot, restored);

    // Selection against the restored snapshot behaves identically.
    let selection = select(&restored, &["gene:b".into()], &[]).unwrap();
    assert_eq!(selection.edges.len(), 3);
}

#[test]
fn skipped_documents_do_not_dilute_npmi() {
    let mut docs = three_docs();
    docs.push(doc("4", &[]));
    docs.push(doc("5", &[]));
    let table = CoOccurrenceTable::ingest(&docs);
    assert_eq!(table.num_documents, 3);
    assert_eq!(table.skipped_documents, 2);

    let clean = CoOccurrenceTable::ingest(&three_docs());
    let config = GraphConfig {
        weighting_method: WeightingMethod::Npmi,
        weight_cutoff: -1.0,
        ..Default::default()
    };
    let with_skips = build_snapshot(&table, &config).unwrap();
    let without = build_snapshot(&clean, &config).unwrap();
    assert_eq!(with_skips.edges, without.edges);
}
