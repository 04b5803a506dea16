//! Relevance scorer: asks the model how in-domain a query is.

use std::sync::Arc;

use ai_llm_service::{BoxFuture, ChatCompletions, ChatMessage, ChatRequest};
use tracing::{debug, warn};

use crate::api_types::{ConfidenceScore, Query};
use crate::cfg::DocumentProfile;
use crate::error::{GateError, ServiceError};
use crate::prompt;

/// Produces one confidence value per query.
pub trait RelevanceScorer: Send + Sync {
    fn score<'a>(
        &'a self,
        query: &'a Query,
        model: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ConfidenceScore, GateError>>;
}

/// Scorer backed by a chat completion model.
pub struct LlmRelevanceScorer {
    llm: Arc<dyn ChatCompletions>,
    instruction: String,
}

impl LlmRelevanceScorer {
    pub fn new(llm: Arc<dyn ChatCompletions>, profile: &DocumentProfile) -> Self {
        Self {
            llm,
            instruction: prompt::scoring_instruction(profile),
        }
    }
}

impl RelevanceScorer for LlmRelevanceScorer {
    fn score<'a>(
        &'a self,
        query: &'a Query,
        model: Option<&'a str>,
    ) -> BoxFuture<'a, Result<ConfidenceScore, GateError>> {
        Box::pin(async move {
            let request = ChatRequest::new(vec![
                ChatMessage::system(self.instruction.as_str()),
                ChatMessage::user(query.as_str()),
            ])
            .with_model(model);

            let out = self.llm.complete(request).await?;
            if out.is_empty() {
                return Err(ServiceError::NoChoices.into());
            }
            let raw = out.first_content().unwrap_or_default();
            let score = parse_confidence(raw).inspect_err(|_| {
                warn!(raw, "scorer: unparseable relevance score");
            })?;
            debug!(score = score.value(), "scorer: done");
            Ok(score)
        })
    }
}

/// Parses raw model output as a score. Surrounding whitespace is ignored;
/// anything else besides a single decimal in `[0, 1]` is rejected.
///
/// # Example
/// ```
/// use rag_gate::parse_confidence;
/// assert_eq!(parse_confidence(" 0.95\n").unwrap().value(), 0.95);
/// assert!(parse_confidence("high").is_err());
/// ```
pub fn parse_confidence(raw: &str) -> Result<ConfidenceScore, GateError> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .and_then(ConfidenceScore::new)
        .ok_or_else(|| GateError::ScoreParse {
            raw: raw.to_string(),
        })
}
