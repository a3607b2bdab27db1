//! Integration coverage for index construction and querying.

use std::collections::HashMap;

use litnet_core::cancel::CancelToken;
use litnet_core::config::GraphConfig;
use litnet_core::errors::{LitNetError, LitNetResult, RetrievalError, ServiceError};
use litnet_core::models::{Document, EntityType, Mention};
use litnet_core::traits::IAbstractStore;
use litnet_network::aggregator::CoOccurrenceTable;
use litnet_network::snapshot::build_snapshot;
use litnet_network::{select, Selection};
use litnet_providers::HashedTfProvider;
use litnet_retrieval::IndexBuilder;

struct MapStore {
    abstracts: HashMap<String, String>,
}

impl MapStore {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            abstracts: entries
                .iter()
                .map(|(pmid, text)| (pmid.to_string(), text.to_string()))
                .collect(),
        }
    }

    fn empty() -> Self {
        Self {
            abstracts: HashMap::new(),
        }
    }
}

impl IAbstractStore for MapStore {
    fn fetch(&self, pmid: &str) -> LitNetResult<Option<String>> {
        Ok(self.abstracts.get(pmid).cloned())
    }
}

fn selection() -> Selection {
    let mut docs = Vec::new();
    for (pmid, terms) in [
        ("100", vec!["il13", "asthma"]),
        ("101", vec!["asthma", "dexamethasone"]),
    ] {
        let mut d = Document::new(pmid, format!("title {pmid}"));
        for term in terms {
            d.mentions.push(Mention::new(term, EntityType::Gene));
        }
        docs.push(d);
    }
    let snapshot =
        build_snapshot(&CoOccurrenceTable::ingest(&docs), &GraphConfig::default()).unwrap();
    select(&snapshot, &["gene:asthma".into()], &[]).unwrap()
}

#[test]
fn empty_abstract_store_fails_closed() {
    let store = MapStore::empty();
    let embedder = HashedTfProvider::new(64);
    let result = IndexBuilder::build(&selection(), &store, &embedder, &CancelToken::new());
    assert!(matches!(
        result,
        Err(LitNetError::Retrieval(RetrievalError::EmptyEvidence { .. }))
    ));
}

#[test]
fn missing_abstracts_are_skipped_not_fatal() {
    let store = MapStore::new(&[("100", "IL13 drives airway inflammation in asthma.")]);
    let embedder = HashedTfProvider::new(64);
    let index =
        IndexBuilder::build(&selection(), &store, &embedder, &CancelToken::new()).unwrap();
    assert_eq!(index.len(), 1);
}

#[test]
fn query_returns_closest_abstract_first() {
    let store = MapStore::new(&[
        ("100", "IL13 drives airway inflammation in asthma patients."),
        ("101", "Dexamethasone dosing schedules in pediatric care."),
    ]);
    let embedder = HashedTfProvider::new(384);
    let index =
        IndexBuilder::build(&selection(), &store, &embedder, &CancelToken::new()).unwrap();
    let hits = index
        .query(&embedder, "airway inflammation asthma il13", 2, &CancelToken::new())
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].pmid, "100");
    assert!(hits[0].distance <= hits[1].distance);
}

#[test]
fn top_k_caps_results() {
    let store = MapStore::new(&[
        ("100", "abstract one about asthma"),
        ("101", "abstract two about asthma"),
    ]);
    let embedder = HashedTfProvider::new(64);
    let index =
        IndexBuilder::build(&selection(), &store, &embedder, &CancelToken::new()).unwrap();
    let hits = index.query(&embedder, "asthma", 1, &CancelToken::new()).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn cancelled_build_surfaces_cancellation() {
    let store = MapStore::new(&[("100", "a"), ("101", "b")]);
    let embedder = HashedTfProvider::new(64);
    let cancel = CancelToken::new();
    cancel.cancel();
    let result = IndexBuilder::build(&selection(), &store, &embedder, &cancel);
    assert!(matches!(
        result,
        Err(LitNetError::Service(ServiceError::Cancelled { .. }))
    ));
}

#[test]
fn blank_abstracts_count_as_missing() {
    let store = MapStore::new(&[("100", "   "), ("101", "")]);
    let embedder = HashedTfProvider::new(64);
    let result = IndexBuilder::build(&selection(), &store, &embedder, &CancelToken::new());
    assert!(matches!(
        result,
        Err(LitNetError::Retrieval(RetrievalError::EmptyEvidence { .. }))
    ));
}
