//! Chunk store over Qdrant: query-by-text retrieval and text ingestion.
//!
//! The store answers one question at request time: "which chunks of this
//! collection are nearest to this text?". It never writes during retrieval,
//! so one [`ChunkStore`] can be shared across concurrent requests.

pub mod chunker;
mod config;
mod embed;
mod errors;
mod ingest;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::{DistanceKind, MAX_TOP_K, StoreConfig, validate_top_k};
pub use embed::{EmbeddingsProvider, llm_embedder::LlmEmbedder};
pub use errors::ChunkStoreError;
pub use ingest::point_id;
pub use record::ChunkHit;

use std::sync::Arc;

use tracing::trace;

/// High-level facade that wires configuration, the Qdrant client and an
/// embedding provider.
pub struct ChunkStore {
    cfg: StoreConfig,
    client: qdrant_facade::QdrantFacade,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl ChunkStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `ChunkStoreError::Config`/`Qdrant` if the client cannot be built.
    pub fn new(cfg: StoreConfig, embedder: Arc<dyn EmbeddingsProvider>) -> Result<Self, ChunkStoreError> {
        trace!("ChunkStore::new url={}", cfg.qdrant_url);
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self {
            cfg,
            client,
            embedder,
        })
    }

    /// Ordered chunk texts nearest to `text` (best first). Empty if nothing matches.
    ///
    /// # Errors
    /// `InvalidTopK`, `CollectionNotFound`, or embedding/Qdrant failures.
    pub async fn retrieve(
        &self,
        text: &str,
        collection: &str,
        k: u64,
    ) -> Result<Vec<String>, ChunkStoreError> {
        Ok(self
            .retrieve_hits(text, collection, k)
            .await?
            .into_iter()
            .map(|h| h.text)
            .collect())
    }

    /// Like [`ChunkStore::retrieve`] but keeps scores and chunk positions.
    pub async fn retrieve_hits(
        &self,
        text: &str,
        collection: &str,
        k: u64,
    ) -> Result<Vec<ChunkHit>, ChunkStoreError> {
        trace!("ChunkStore::retrieve_hits collection={collection} k={k}");
        retrieve::retrieve_hits(&self.cfg, &self.client, self.embedder.as_ref(), text, collection, k)
            .await
    }

    /// Embeds and stores `chunks` (document order) into `collection`.
    ///
    /// # Errors
    /// Embedding, dimension or Qdrant failures.
    pub async fn ingest_chunks(
        &self,
        collection: &str,
        chunks: &[String],
    ) -> Result<usize, ChunkStoreError> {
        ingest::ingest_chunks(&self.cfg, &self.client, self.embedder.as_ref(), collection, chunks)
            .await
    }

    /// Splits `text` into `chunk_chars`-sized chunks and ingests them.
    pub async fn ingest_text(
        &self,
        collection: &str,
        text: &str,
        chunk_chars: usize,
    ) -> Result<usize, ChunkStoreError> {
        if chunk_chars == 0 {
            return Err(ChunkStoreError::Config("chunk size must be > 0".into()));
        }
        let chunks = chunker::split_fixed(text, chunk_chars);
        self.ingest_chunks(collection, &chunks).await
    }
}
