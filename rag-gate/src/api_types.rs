//! Public value types shared with external crates (e.g., the HTTP API layer).

use std::fmt;

use serde::Serialize;

use crate::error::GateError;

/// A user question, trimmed and guaranteed non-empty.
///
/// # Example
/// ```
/// use rag_gate::Query;
/// let q = Query::new("  What is the Bodleian?  ").unwrap();
/// assert_eq!(q.as_str(), "What is the Bodleian?");
/// assert!(Query::new("   ").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Result<Self, GateError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GateError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relevance of a query to the indexed document, always a finite value in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ConfidenceScore(f32);

impl ConfidenceScore {
    /// `None` for NaN, infinities and anything outside `[0, 1]`.
    pub fn new(value: f32) -> Option<Self> {
        (value.is_finite() && (0.0..=1.0).contains(&value)).then_some(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Inclusive: a score equal to the threshold passes.
    pub fn passes(self, threshold: f32) -> bool {
        self.0 >= threshold
    }
}

/// How the pipeline ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Answered,
    Refused,
}

/// Answer paired with the exact chunks that produced it.
///
/// `chunks` is empty for a refusal and may be empty for an answered query
/// when retrieval found nothing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryResult {
    pub query: Query,
    pub answer: String,
    pub chunks: Vec<String>,
    pub outcome: Outcome,
    pub score: ConfidenceScore,
}

/// Per-call knobs. `None` means "use the configured default".
///
/// # Example
/// ```
/// use rag_gate::AskOptions;
/// let opts = AskOptions { k: Some(5), model: None };
/// assert_eq!(opts.k, Some(5));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AskOptions {
    /// Number of chunks to retrieve, `1..=20`.
    pub k: Option<u64>,
    /// Model id for both the scoring and the composing call.
    pub model: Option<String>,
}
