//! Ephemeral per-selection vector index.
//!
//! The index owns its rows outright: pmid, abstract text, and embedding.
//! It holds no reference into the snapshot or selection, so rebuilding
//! either never invalidates a live index.

use litnet_core::cancel::CancelToken;
use litnet_core::constants::EMBED_BATCH_SIZE;
use litnet_core::errors::{LitNetResult, RetrievalError, ServiceError};
use litnet_core::models::TextEvidence;
use litnet_core::traits::{IAbstractStore, IEmbeddingProvider};
use litnet_network::Selection;

struct Row {
    pmid: String,
    text: String,
    embedding: Vec<f32>,
}

pub struct VectorIndex {
    rows: Vec<Row>,
    dimensions: usize,
}

impl VectorIndex {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Top-k rows by cosine distance to the query text.
    pub fn query(
        &self,
        embedder: &dyn IEmbeddingProvider,
        text: &str,
        k: usize,
        cancel: &CancelToken,
    ) -> LitNetResult<Vec<TextEvidence>> {
        if k == 0 || self.rows.is_empty() {
            return Ok(Vec::new());
        }
        let query = embedder.embed(text, cancel)?;
        let mut scored: Vec<TextEvidence> = self
            .rows
            .iter()
            .map(|row| TextEvidence {
                pmid: row.pmid.clone(),
                text: row.text.clone(),
                distance: cosine_distance(&query, &row.embedding),
            })
            .collect();
        scored.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.pmid.cmp(&b.pmid))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

pub struct IndexBuilder;

impl IndexBuilder {
    /// Fetch, de-duplicate, and embed the abstracts behind a selection.
    ///
    /// Fails closed: a selection with no PMIDs, or whose PMIDs all lack
    /// retrievable abstracts, yields `EmptyEvidence` rather than an index
    /// that silently answers from nothing. Missing individual abstracts
    /// are logged and skipped. Cancellation is checked between embedding
    /// batches.
    pub fn build(
        selection: &Selection,
        store: &dyn IAbstractStore,
        embedder: &dyn IEmbeddingProvider,
        cancel: &CancelToken,
    ) -> LitNetResult<VectorIndex> {
        if selection.pmids.is_empty() {
            return Err(RetrievalError::EmptyEvidence {
                reason: "selection reaches no documents".to_string(),
            }
            .into());
        }

        let mut pmids: Vec<String> = Vec::new();
        let mut texts: Vec<String> = Vec::new();
        for pmid in &selection.pmids {
            match store.fetch(pmid)? {
                Some(text) if !text.trim().is_empty() => {
                    pmids.push(pmid.clone());
                    texts.push(text);
                }
                _ => {
                    tracing::debug!(pmid = %pmid, "no abstract available, skipping");
                }
            }
        }
        if texts.is_empty() {
            return Err(RetrievalError::EmptyEvidence {
                reason: format!(
                    "none of the {} selected documents has a retrievable abstract",
                    selection.pmids.len()
                ),
            }
            .into());
        }

        let mut rows: Vec<Row> = Vec::with_capacity(texts.len());
        for (chunk_pmids, chunk_texts) in pmids
            .chunks(EMBED_BATCH_SIZE)
            .zip(texts.chunks(EMBED_BATCH_SIZE))
        {
            if cancel.is_cancelled() {
                return Err(ServiceError::Cancelled {
                    provider: embedder.name().to_string(),
                }
                .into());
            }
            let embeddings = embedder.embed_batch(chunk_texts, cancel)?;
            for ((pmid, text), embedding) in
                chunk_pmids.iter().zip(chunk_texts).zip(embeddings)
            {
                rows.push(Row {
                    pmid: pmid.clone(),
                    text: text.clone(),
                    embedding,
                });
            }
        }

        tracing::info!(
            selection = %selection.id,
            documents = rows.len(),
            "built vector index"
        );
        Ok(VectorIndex {
            rows,
            dimensions: embedder.dimensions(),
        })
    }
}
