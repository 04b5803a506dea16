//! Query-by-text retrieval: validate → check collection → embed → search.

use tracing::{debug, trace};

use crate::config::{StoreConfig, validate_top_k};
use crate::embed::EmbeddingsProvider;
use crate::errors::ChunkStoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::ChunkHit;

/// Top-`k` chunks for `text` from `collection`, best match first.
///
/// The collection check runs before embedding so a misconfigured collection
/// costs no embedding call. An existing collection with no matches yields an
/// empty vector.
///
/// # Errors
/// - `InvalidTopK` when `k` is outside `1..=MAX_TOP_K`
/// - `CollectionNotFound` when the collection does not exist
/// - `Embedding` / `VectorSizeMismatch` / `Qdrant` for the remaining failures
pub async fn retrieve_hits(
    cfg: &StoreConfig,
    client: &QdrantFacade,
    provider: &dyn EmbeddingsProvider,
    text: &str,
    collection: &str,
    k: u64,
) -> Result<Vec<ChunkHit>, ChunkStoreError> {
    validate_top_k(k)?;

    if !client.collection_exists(collection).await? {
        return Err(ChunkStoreError::CollectionNotFound(collection.to_string()));
    }

    let qv = provider.embed(text).await?;
    trace!(dim = qv.len(), "retrieve: query embedded");

    let raw = client.search(collection, qv, k, cfg.exact_search).await?;
    let hits = hits_from_results(raw);

    debug!(
        collection,
        k,
        hits = hits.len(),
        top_score = hits.first().map(|h| h.score),
        "retrieve: done"
    );
    Ok(hits)
}

/// Keeps search order; drops points without a text payload.
pub(crate) fn hits_from_results(raw: Vec<(f32, serde_json::Value)>) -> Vec<ChunkHit> {
    raw.iter()
        .filter_map(|(score, payload)| ChunkHit::from_payload(*score, payload))
        .collect()
}
