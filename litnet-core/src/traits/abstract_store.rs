use crate::errors::LitNetResult;

/// Source of abstract text by PMID (document cache or bibliographic API).
pub trait IAbstractStore: Send + Sync {
    /// Fetch the abstract for a PMID. `Ok(None)` means the document has
    /// no retrievable abstract; this is not an error.
    fn fetch(&self, pmid: &str) -> LitNetResult<Option<String>>;
}
