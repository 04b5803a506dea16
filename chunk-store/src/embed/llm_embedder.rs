//! Embedding provider backed by the shared `ai-llm-service` embedding profile.

use std::sync::Arc;

use ai_llm_service::{BoxFuture, LlmServiceProfiles};

use crate::{EmbeddingsProvider, errors::ChunkStoreError};

/// Embeds text through [`LlmServiceProfiles::embed`], optionally enforcing a dimension.
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: Option<usize>,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, ChunkStoreError>> {
        Box::pin(async move {
            let v = self.svc.embed(text).await?;
            check_dim(v, self.dim)
        })
    }
}

pub(crate) fn check_dim(v: Vec<f32>, want: Option<usize>) -> Result<Vec<f32>, ChunkStoreError> {
    match want {
        Some(want) if v.len() != want => Err(ChunkStoreError::VectorSizeMismatch {
            got: v.len(),
            want,
        }),
        _ => Ok(v),
    }
}
