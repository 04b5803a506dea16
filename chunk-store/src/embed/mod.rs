use ai_llm_service::BoxFuture;

use crate::errors::ChunkStoreError;

/// Provider interface for embedding generation.
///
/// Async because real providers perform HTTP requests. Implement this trait
/// to plug in another embedding backend.
pub trait EmbeddingsProvider: Send + Sync {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, ChunkStoreError>>;
}

pub mod llm_embedder;
