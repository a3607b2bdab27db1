use crate::errors::LitNetResult;
use crate::models::{Document, Pmid};

/// Source of entity-tagged literature documents.
pub trait IDocumentProvider: Send + Sync {
    /// Search by free-text query, returning up to `limit` tagged documents.
    fn search(&self, query: &str, limit: usize) -> LitNetResult<Vec<Document>>;

    /// Fetch specific documents by PMID.
    fn fetch(&self, pmids: &[Pmid]) -> LitNetResult<Vec<Document>>;
}
