//! Unified error types for the crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for chunk-store operations.
#[derive(Debug, Error)]
pub enum ChunkStoreError {
    /// The named collection does not exist. A setup fault, not a query fault.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// Requested `k` is outside `1..=max`.
    #[error("invalid top_k {k}: expected 1..={max}")]
    InvalidTopK { k: u64, max: u64 },

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Embedding provider failed (transport, auth, quota, decode).
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),

    /// Mismatch between the embedding size and the expected dimension.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
