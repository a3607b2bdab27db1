//! Trait seams to external collaborators.

mod abstract_store;
mod document_provider;
mod embedding;
mod generation;

pub use abstract_store::IAbstractStore;
pub use document_provider::IDocumentProvider;
pub use embedding::IEmbeddingProvider;
pub use generation::IGenerationService;
