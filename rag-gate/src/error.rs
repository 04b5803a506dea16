//! Typed errors for the gate pipeline.

use ai_llm_service::AiLlmError;
use chunk_store::ChunkStoreError;
use thiserror::Error;

/// Failure of an upstream collaborator (language model or vector store).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport, auth, quota, timeout or decode failure from the LLM.
    #[error("language model call failed: {0}")]
    Llm(#[from] AiLlmError),

    /// Vector store failure other than a missing collection.
    #[error("chunk store call failed: {0}")]
    Store(ChunkStoreError),

    /// The model answered with zero choices where a value was required.
    #[error("language model returned no choices")]
    NoChoices,
}

/// Everything the pipeline can fail with. A refusal is not an error.
#[derive(Debug, Error)]
pub enum GateError {
    /// Scorer output was empty, not a number, or outside `[0, 1]`.
    #[error("relevance score is not a number in [0, 1]: {raw:?}")]
    ScoreParse { raw: String },

    /// The configured collection does not exist. Fatal setup problem.
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Query was empty after trimming.
    #[error("query is empty")]
    EmptyQuery,

    /// `k` outside `1..=max`.
    #[error("invalid retrieval count {k}: expected 1..={max}")]
    InvalidRetrievalCount { k: u64, max: u64 },
}

impl From<AiLlmError> for GateError {
    fn from(e: AiLlmError) -> Self {
        GateError::Service(ServiceError::Llm(e))
    }
}

impl From<ChunkStoreError> for GateError {
    fn from(e: ChunkStoreError) -> Self {
        match e {
            ChunkStoreError::CollectionNotFound(collection) => {
                GateError::CollectionNotFound { collection }
            }
            ChunkStoreError::InvalidTopK { k, max } => GateError::InvalidRetrievalCount { k, max },
            other => GateError::Service(ServiceError::Store(other)),
        }
    }
}
