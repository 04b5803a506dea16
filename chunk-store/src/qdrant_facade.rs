//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant interactions live behind this minimal API so the rest of the
//! crate never touches the builder types directly. The collection is passed
//! per call: one facade serves any number of collections.

use std::collections::HashMap;
use std::time::Duration;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchParamsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
};
use tracing::{debug, info};

use crate::config::{DistanceKind, StoreConfig};
use crate::errors::ChunkStoreError;

/// A facade over the Qdrant client.
///
/// The underlying client is cheap to share and safe for concurrent reads.
pub struct QdrantFacade {
    client: Qdrant,
    distance: DistanceKind,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// No request is sent here; a wrong URL or key shows up on the first call.
    pub fn new(cfg: &StoreConfig) -> Result<Self, ChunkStoreError> {
        cfg.validate()?;

        let mut builder =
            Qdrant::from_url(&cfg.qdrant_url).timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| ChunkStoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            distance: cfg.distance,
        })
    }

    /// Whether `collection` exists.
    pub async fn collection_exists(&self, collection: &str) -> Result<bool, ChunkStoreError> {
        self.client
            .collection_exists(collection)
            .await
            .map_err(|e| ChunkStoreError::Qdrant(e.to_string()))
    }

    /// Ensures that the collection exists, creating it with `size`-dim vectors if missing.
    pub async fn ensure_collection(
        &self,
        collection: &str,
        size: usize,
    ) -> Result<(), ChunkStoreError> {
        if self.collection_exists(collection).await? {
            debug!("Collection '{}' already exists", collection);
            return Ok(());
        }

        info!(
            "Creating collection '{}' with size={} distance={:?}",
            collection, size, self.distance
        );

        let distance = match self.distance {
            DistanceKind::Cosine => Distance::Cosine,
            DistanceKind::Dot => Distance::Dot,
            DistanceKind::Euclid => Distance::Euclid,
        };

        self.client
            .create_collection(
                CreateCollectionBuilder::new(collection)
                    .vectors_config(VectorParamsBuilder::new(size as u64, distance)),
            )
            .await
            .map_err(|e| ChunkStoreError::Qdrant(e.to_string()))?;

        Ok(())
    }

    /// Upserts a batch of points and waits for it to be applied.
    ///
    /// Returns the number of points sent.
    pub async fn upsert_points(
        &self,
        collection: &str,
        points: Vec<PointStruct>,
    ) -> Result<usize, ChunkStoreError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(0);
        }
        let n = points.len();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await
            .map_err(|e| ChunkStoreError::Qdrant(e.to_string()))?;

        debug!("Upserted {} points into '{}'", n, collection);
        Ok(n)
    }

    /// Performs a similarity search.
    ///
    /// Returns `(score, payload)` tuples, best match first. A search against a
    /// collection that disappeared between calls maps to `CollectionNotFound`.
    pub async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        top_k: u64,
        exact: bool,
    ) -> Result<Vec<(f32, serde_json::Value)>, ChunkStoreError> {
        debug!(
            "Searching in '{}' with top_k={}, exact={}",
            collection, top_k, exact
        );

        let mut builder = SearchPointsBuilder::new(collection, vector, top_k).with_payload(true);
        if exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| classify_search_error(collection, &e.to_string()))?;

        Ok(res
            .result
            .into_iter()
            .map(|r| (r.score, qpayload_to_json(r.payload)))
            .collect())
    }
}

/// Qdrant reports a missing collection as a `NotFound` status whose message
/// contains "doesn't exist" or "Not found".
pub(crate) fn classify_search_error(collection: &str, msg: &str) -> ChunkStoreError {
    let lower = msg.to_ascii_lowercase();
    if lower.contains("doesn't exist") || lower.contains("not found") {
        ChunkStoreError::CollectionNotFound(collection.to_string())
    } else {
        ChunkStoreError::Qdrant(msg.to_string())
    }
}

/// Converts a Qdrant payload into JSON.
///
/// Nested structs/lists are not used by this store and map to `Null`.
fn qpayload_to_json(mut p: HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::value::Kind;

    #[test]
    fn missing_collection_messages_are_classified() {
        let e = classify_search_error(
            "Oxford-Guide-2022",
            "status: NotFound, message: \"Collection `Oxford-Guide-2022` doesn't exist!\"",
        );
        assert!(matches!(e, ChunkStoreError::CollectionNotFound(c) if c == "Oxford-Guide-2022"));

        let e = classify_search_error("c", "transport error: connection refused");
        assert!(matches!(e, ChunkStoreError::Qdrant(_)));
    }

    #[test]
    fn payload_conversion_keeps_scalars() {
        let mut p = HashMap::new();
        p.insert(
            "text".to_string(),
            QValue {
                kind: Some(Kind::StringValue("Oxford was founded".into())),
            },
        );
        p.insert(
            "chunk_index".to_string(),
            QValue {
                kind: Some(Kind::IntegerValue(7)),
            },
        );
        let json = qpayload_to_json(p);
        assert_eq!(json["text"], "Oxford was founded");
        assert_eq!(json["chunk_index"], 7);
    }
}
