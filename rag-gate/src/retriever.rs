//! Retrieval seam between the orchestrator and the vector store.

use ai_llm_service::BoxFuture;
use chunk_store::ChunkStore;

use crate::api_types::Query;
use crate::error::GateError;

/// Top-`k` chunk texts for a query, most relevant first.
///
/// An existing collection with no matches yields an empty list. A missing
/// collection is [`GateError::CollectionNotFound`].
pub trait ChunkRetriever: Send + Sync {
    fn retrieve<'a>(
        &'a self,
        query: &'a Query,
        collection: &'a str,
        k: u64,
    ) -> BoxFuture<'a, Result<Vec<String>, GateError>>;
}

impl ChunkRetriever for ChunkStore {
    fn retrieve<'a>(
        &'a self,
        query: &'a Query,
        collection: &'a str,
        k: u64,
    ) -> BoxFuture<'a, Result<Vec<String>, GateError>> {
        Box::pin(async move { Ok(ChunkStore::retrieve(self, query.as_str(), collection, k).await?) })
    }
}
