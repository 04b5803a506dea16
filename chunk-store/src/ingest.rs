//! Text ingestion: chunks → embeddings → points → Qdrant.
//!
//! The PDF-to-text step happens elsewhere; this module takes chunks that are
//! already in document order.

use futures::stream::{self, StreamExt, TryStreamExt};
use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::ChunkStoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{INDEX_KEY, TEXT_KEY};

/// Embeds and upserts `chunks` into `collection`, creating it if needed.
///
/// Vector size comes from `cfg.embedding_dim` or the first embedding.
/// Point ids are deterministic per `(collection, index)`, so re-ingesting the
/// same document overwrites instead of duplicating.
///
/// # Errors
/// Embedding, dimension or Qdrant failures abort the run.
pub async fn ingest_chunks(
    cfg: &StoreConfig,
    client: &QdrantFacade,
    provider: &dyn EmbeddingsProvider,
    collection: &str,
    chunks: &[String],
) -> Result<usize, ChunkStoreError> {
    if chunks.is_empty() {
        debug!("ingest: no chunks for '{}'", collection);
        return Ok(0);
    }
    info!(collection, chunks = chunks.len(), "ingest: start");

    let mut total = 0usize;
    let mut vector_size = cfg.embedding_dim;
    let batch = cfg.upsert_batch.max(1);

    for (batch_no, window) in chunks.chunks(batch).enumerate() {
        let offset = batch_no * batch;

        // `buffered` keeps input order, so vectors line up with `window`.
        let vectors: Vec<Vec<f32>> = stream::iter(window.iter())
            .map(|text| provider.embed(text))
            .buffered(cfg.embedding_concurrency.max(1))
            .try_collect()
            .await?;

        let want = match vector_size {
            Some(n) => n,
            None => vectors.first().map(Vec::len).unwrap_or(0),
        };
        if batch_no == 0 {
            client.ensure_collection(collection, want).await?;
            vector_size = Some(want);
        }

        let mut points = Vec::with_capacity(window.len());
        for (i, (text, vector)) in window.iter().zip(vectors).enumerate() {
            if vector.len() != want {
                return Err(ChunkStoreError::VectorSizeMismatch {
                    got: vector.len(),
                    want,
                });
            }
            points.push(build_point(collection, offset + i, text, vector));
        }

        total += client.upsert_points(collection, points).await?;
    }

    info!(collection, total, "ingest: done");
    Ok(total)
}

/// Deterministic UUIDv5 for a chunk position inside a collection.
pub fn point_id(collection: &str, index: usize) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_URL,
        format!("{collection}#{index}").as_bytes(),
    )
}

fn build_point(collection: &str, index: usize, text: &str, vector: Vec<f32>) -> PointStruct {
    let mut payload = Payload::new();
    payload.insert(TEXT_KEY, text.to_string());
    payload.insert(INDEX_KEY, index as i64);
    PointStruct::new(point_id(collection, index).to_string(), vector, payload)
}
