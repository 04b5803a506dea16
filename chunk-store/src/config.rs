//! Connection and collection configuration.

use crate::errors::ChunkStoreError;

/// Upper bound for `k` in a single retrieval.
pub const MAX_TOP_K: u64 = 20;

/// Distance function used when a collection is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

impl DistanceKind {
    /// Parses case-insensitively; `None` means Cosine.
    ///
    /// # Errors
    /// `ChunkStoreError::Config` for an unknown name.
    pub fn parse(s: Option<&str>) -> Result<Self, ChunkStoreError> {
        let Some(raw) = s else {
            return Ok(DistanceKind::Cosine);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(DistanceKind::Cosine),
            "dot" | "dotproduct" => Ok(DistanceKind::Dot),
            "euclid" | "l2" => Ok(DistanceKind::Euclid),
            _ => Err(ChunkStoreError::Config(format!(
                "QDRANT_DISTANCE: expected cosine, dot or euclid, got {raw:?}"
            ))),
        }
    }
}

/// Configuration for the Qdrant-backed chunk store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Per-call timeout for Qdrant requests.
    pub timeout_secs: u64,
    /// Distance function for newly created collections.
    pub distance: DistanceKind,
    /// Upsert batch size during ingestion.
    pub upsert_batch: usize,
    /// Max concurrent embedding calls during ingestion.
    pub embedding_concurrency: usize,
    /// Expected embedding dimension, if known.
    pub embedding_dim: Option<usize>,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl StoreConfig {
    /// Creates a default config for a given Qdrant endpoint.
    pub fn new_default(url: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            timeout_secs: 30,
            distance: DistanceKind::Cosine,
            upsert_batch: 256,
            embedding_concurrency: 4,
            embedding_dim: None,
            exact_search: false,
        }
    }

    /// Reads the process environment.
    ///
    /// # Errors
    /// See [`StoreConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ChunkStoreError> {
        Self::from_lookup(&ai_llm_service::error_handler::env_var)
    }

    /// Reads `QDRANT_URL`, `QDRANT_API_KEY`, `QDRANT_TIMEOUT_SECS`,
    /// `QDRANT_DISTANCE`, `QDRANT_BATCH_SIZE`, `EMBEDDING_CONCURRENCY`,
    /// `EMBEDDING_DIM` and `RAG_EXACT_SEARCH` through `lookup`.
    ///
    /// # Errors
    /// Returns `ChunkStoreError::Config` for malformed numbers or an invalid result.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ChunkStoreError> {
        let dflt = Self::new_default(
            lookup("QDRANT_URL").unwrap_or_else(|| "http://localhost:6334".to_string()),
        );

        let cfg = Self {
            qdrant_api_key: lookup("QDRANT_API_KEY"),
            timeout_secs: number(lookup, "QDRANT_TIMEOUT_SECS")?.unwrap_or(dflt.timeout_secs),
            distance: DistanceKind::parse(lookup("QDRANT_DISTANCE").as_deref())?,
            upsert_batch: number(lookup, "QDRANT_BATCH_SIZE")?.unwrap_or(dflt.upsert_batch),
            embedding_concurrency: number(lookup, "EMBEDDING_CONCURRENCY")?
                .unwrap_or(dflt.embedding_concurrency),
            embedding_dim: number(lookup, "EMBEDDING_DIM")?,
            exact_search: lookup("RAG_EXACT_SEARCH").as_deref() == Some("true"),
            ..dflt
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), ChunkStoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(ChunkStoreError::Config("qdrant_url is empty".into()));
        }
        if self.upsert_batch == 0 {
            return Err(ChunkStoreError::Config("upsert_batch must be > 0".into()));
        }
        if self.embedding_dim == Some(0) {
            return Err(ChunkStoreError::Config("embedding_dim must be > 0".into()));
        }
        Ok(())
    }
}

fn number<T: std::str::FromStr>(
    lookup: &dyn Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<T>, ChunkStoreError> {
    match lookup(var) {
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| ChunkStoreError::Config(format!("{var}: expected a number, got {v:?}"))),
        None => Ok(None),
    }
}

/// Checks `1 <= k <= MAX_TOP_K`. Out-of-range values are rejected, never clamped.
pub fn validate_top_k(k: u64) -> Result<(), ChunkStoreError> {
    if (1..=MAX_TOP_K).contains(&k) {
        Ok(())
    } else {
        Err(ChunkStoreError::InvalidTopK { k, max: MAX_TOP_K })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn top_k_bounds_are_inclusive() {
        assert!(validate_top_k(1).is_ok());
        assert!(validate_top_k(MAX_TOP_K).is_ok());
        assert!(matches!(
            validate_top_k(0),
            Err(ChunkStoreError::InvalidTopK { k: 0, max: 20 })
        ));
        assert!(matches!(
            validate_top_k(21),
            Err(ChunkStoreError::InvalidTopK { k: 21, .. })
        ));
    }

    #[test]
    fn lookup_defaults() {
        let cfg = StoreConfig::from_lookup(&vars(&[])).unwrap();
        assert_eq!(cfg.qdrant_url, "http://localhost:6334");
        assert_eq!(cfg.distance, DistanceKind::Cosine);
        assert_eq!(cfg.upsert_batch, 256);
        assert_eq!(cfg.embedding_dim, None);
        assert!(!cfg.exact_search);
    }

    #[test]
    fn lookup_overrides_and_rejects_garbage() {
        let cfg = StoreConfig::from_lookup(&vars(&[
            ("QDRANT_URL", "http://qdrant:6334"),
            ("QDRANT_DISTANCE", "Dot"),
            ("EMBEDDING_DIM", "1024"),
            ("RAG_EXACT_SEARCH", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.qdrant_url, "http://qdrant:6334");
        assert_eq!(cfg.distance, DistanceKind::Dot);
        assert_eq!(cfg.embedding_dim, Some(1024));
        assert!(cfg.exact_search);

        assert!(StoreConfig::from_lookup(&vars(&[("QDRANT_BATCH_SIZE", "0")])).is_err());
        assert!(StoreConfig::from_lookup(&vars(&[("EMBEDDING_DIM", "big")])).is_err());
    }

    #[test]
    fn unknown_distance_is_rejected() {
        assert!(matches!(
            StoreConfig::from_lookup(&vars(&[("QDRANT_DISTANCE", "cosin")])),
            Err(ChunkStoreError::Config(_))
        ));
        assert_eq!(DistanceKind::parse(Some(" L2 ")).unwrap(), DistanceKind::Euclid);
        assert_eq!(DistanceKind::parse(Some("COSINE")).unwrap(), DistanceKind::Cosine);
        assert_eq!(DistanceKind::parse(None).unwrap(), DistanceKind::Cosine);
    }
}
