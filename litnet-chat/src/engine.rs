//! Engine facade.
//!
//! Wires the pipeline end to end: document ingestion, snapshot building,
//! subgraph selection, per-selection index construction, and grounded
//! question answering. External collaborators (embedding, generation,
//! abstract store) are injected as trait objects.

use std::sync::Arc;

use litnet_core::cancel::CancelToken;
use litnet_core::config::LitNetConfig;
use litnet_core::errors::LitNetResult;
use litnet_core::models::{AskOutcome, Document};
use litnet_core::traits::{IAbstractStore, IDocumentProvider, IEmbeddingProvider, IGenerationService};
use litnet_network::aggregator::CoOccurrenceTable;
use litnet_network::snapshot::build_snapshot;
use litnet_network::{export, select, GraphSnapshot, Selection};
use litnet_providers::{create_embedding_provider, RemoteGenerationService};
use litnet_retrieval::{BuildGuard, IndexBuilder};

use crate::manager::SessionManager;
use crate::session::ChatSession;
use crate::synthesizer;

pub struct LitNetEngine {
    config: LitNetConfig,
    embedder: Box<dyn IEmbeddingProvider>,
    generator: Box<dyn IGenerationService>,
    store: Box<dyn IAbstractStore>,
    sessions: SessionManager,
    build_guard: BuildGuard,
}

impl LitNetEngine {
    /// Build an engine with injected collaborators.
    pub fn new(
        config: LitNetConfig,
        embedder: Box<dyn IEmbeddingProvider>,
        generator: Box<dyn IGenerationService>,
        store: Box<dyn IAbstractStore>,
    ) -> Self {
        Self {
            config,
            embedder,
            generator,
            store,
            sessions: SessionManager::new(),
            build_guard: BuildGuard::new(),
        }
    }

    /// Build an engine with providers constructed from configuration.
    pub fn from_config(
        config: LitNetConfig,
        store: Box<dyn IAbstractStore>,
    ) -> LitNetResult<Self> {
        let embedder = create_embedding_provider(&config.embedding)?;
        let generator = Box::new(RemoteGenerationService::new(&config.generation)?);
        Ok(Self::new(config, embedder, generator, store))
    }

    /// Aggregate documents and build a snapshot under the configured
    /// weighting method and cutoff.
    pub fn build_snapshot(&self, documents: &[Document]) -> LitNetResult<Arc<GraphSnapshot>> {
        let table = CoOccurrenceTable::ingest(documents);
        let snapshot = build_snapshot(&table, &self.config.graph)?;
        Ok(Arc::new(snapshot))
    }

    /// Search a document provider and build a snapshot from the hits.
    pub fn build_snapshot_from_query(
        &self,
        provider: &dyn IDocumentProvider,
        query: &str,
        limit: usize,
    ) -> LitNetResult<Arc<GraphSnapshot>> {
        let documents = provider.search(query, limit)?;
        tracing::info!(query, hits = documents.len(), "fetched tagged documents");
        self.build_snapshot(&documents)
    }

    /// Resolve a subgraph selection against a snapshot.
    pub fn select(
        &self,
        snapshot: &GraphSnapshot,
        node_ids: &[String],
        edge_ids: &[String],
    ) -> LitNetResult<Selection> {
        Ok(select(snapshot, node_ids, edge_ids)?)
    }

    /// Build the retrieval context for a selection and open a session
    /// over it. Returns the new session id.
    ///
    /// At most one build runs per selection; a concurrent duplicate is
    /// rejected with `BuildInFlight`.
    pub fn analyze_selection(
        &self,
        selection: Selection,
        cancel: &CancelToken,
    ) -> LitNetResult<String> {
        let _permit = self.build_guard.acquire(&selection.id)?;
        let index = IndexBuilder::build(
            &selection,
            self.store.as_ref(),
            self.embedder.as_ref(),
            cancel,
        )?;
        let session = ChatSession::new(selection, index);
        Ok(self.sessions.insert(session))
    }

    /// Answer a question inside a session.
    ///
    /// The session lock is held only while retrieving evidence and while
    /// recording the finished turn; the blocking generation call runs
    /// between the two with no lock held, so other sessions (and
    /// `end_session` on this one) proceed while generation is in flight.
    pub fn ask(
        &self,
        session_id: &str,
        query: &str,
        cancel: &CancelToken,
    ) -> LitNetResult<AskOutcome> {
        let prepared = self.sessions.with_session(session_id, |session| {
            synthesizer::prepare(session, query, self.embedder.as_ref(), &self.config.chat, cancel)
        })??;
        let Some(prompt) = prepared else {
            return Ok(synthesizer::abstention());
        };

        let answer_text = self.generator.complete(&prompt.messages, cancel)?;
        let turn = synthesizer::conclude(query, answer_text, prompt);

        // The session may have been ended while generation ran.
        self.sessions
            .with_session(session_id, |session| session.record_turn(turn.clone()))?;
        Ok(AskOutcome::Answered(turn))
    }

    /// End a session, dropping its retrieval context.
    pub fn end_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Serialize a snapshot to the versioned interchange format.
    pub fn export_snapshot(&self, snapshot: &GraphSnapshot) -> LitNetResult<String> {
        Ok(export::to_json(snapshot)?)
    }

    /// Reconstruct a snapshot from the interchange format.
    pub fn import_snapshot(&self, json: &str) -> LitNetResult<Arc<GraphSnapshot>> {
        Ok(Arc::new(export::from_json(json)?))
    }
}
