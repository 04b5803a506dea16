use rag_gate::{AskOptions, Outcome, QueryResult};
use serde::{Deserialize, Serialize};

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question.
    pub question: String,
    /// Optional override: number of chunks to retrieve (1..=20).
    #[serde(default)]
    pub k: Option<u64>,
    /// Optional override: model id for scoring and answering.
    #[serde(default)]
    pub model: Option<String>,
}

impl AskRequest {
    pub fn options(&self) -> AskOptions {
        AskOptions {
            k: self.k,
            model: self.model.clone(),
        }
    }
}

/// Response payload for /ask. A refusal is a normal response.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    /// Chunks the answer was composed from, most relevant first.
    pub chunks: Vec<String>,
    pub outcome: Outcome,
    pub score: f32,
}

impl From<QueryResult> for AskResponse {
    fn from(r: QueryResult) -> Self {
        Self {
            question: r.query.to_string(),
            answer: r.answer,
            chunks: r.chunks,
            outcome: r.outcome,
            score: r.score.value(),
        }
    }
}
