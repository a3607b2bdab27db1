//! Shared fixtures for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use litnet_core::cancel::CancelToken;
use litnet_core::config::GraphConfig;
use litnet_core::errors::{LitNetResult, ServiceError};
use litnet_core::models::{ChatMessage, Document, EntityType, Mention};
use litnet_core::traits::{IAbstractStore, IGenerationService};
use litnet_network::aggregator::CoOccurrenceTable;
use litnet_network::snapshot::build_snapshot;
use litnet_network::{select, Selection};
use litnet_providers::HashedTfProvider;
use litnet_retrieval::IndexBuilder;

use crate::session::ChatSession;

pub struct MapStore {
    abstracts: HashMap<String, String>,
}

impl MapStore {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            abstracts: entries
                .iter()
                .map(|(pmid, text)| (pmid.to_string(), text.to_string()))
                .collect(),
        }
    }
}

impl IAbstractStore for MapStore {
    fn fetch(&self, pmid: &str) -> LitNetResult<Option<String>> {
        Ok(self.abstracts.get(pmid).cloned())
    }
}

/// Generation mock that records calls and plays back a scripted answer.
pub struct ScriptedGenerator {
    pub answer: String,
    pub fail: bool,
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedGenerator {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: String::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

impl IGenerationService for ScriptedGenerator {
    fn complete(&self, messages: &[ChatMessage], _cancel: &CancelToken) -> LitNetResult<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(messages.to_vec());
        }
        if self.fail {
            return Err(ServiceError::Provider {
                provider: "scripted".into(),
                reason: "scripted failure".into(),
            }
            .into());
        }
        Ok(self.answer.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn doc(pmid: &str, terms: &[(&str, EntityType)]) -> Document {
    let mut d = Document::new(pmid, format!("title {pmid}"));
    for (term, ty) in terms {
        d.mentions.push(Mention::new(*term, *ty));
    }
    d
}

pub fn sample_selection() -> Selection {
    let docs = vec![
        doc(
            "100",
            &[("IL13", EntityType::Gene), ("asthma", EntityType::Disease)],
        ),
        doc(
            "101",
            &[
                ("asthma", EntityType::Disease),
                ("dexamethasone", EntityType::Chemical),
            ],
        ),
    ];
    let snapshot =
        build_snapshot(&CoOccurrenceTable::ingest(&docs), &GraphConfig::default()).unwrap();
    select(&snapshot, &["disease:asthma".into()], &[]).unwrap()
}

pub fn sample_store() -> MapStore {
    MapStore::new(&[
        ("100", "IL13 drives airway inflammation in asthma."),
        ("101", "Dexamethasone reduces asthma exacerbations."),
    ])
}

pub fn sample_session() -> ChatSession {
    let selection = sample_selection();
    let embedder = HashedTfProvider::new(64);
    let index = IndexBuilder::build(
        &selection,
        &sample_store(),
        &embedder,
        &CancelToken::new(),
    )
    .unwrap();
    ChatSession::new(selection, index)
}
