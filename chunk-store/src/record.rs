//! Point payload layout and retrieval hits.

use serde_json::Value;

/// Payload key holding the chunk body.
pub const TEXT_KEY: &str = "text";
/// Payload key holding the chunk's position in the source document.
pub const INDEX_KEY: &str = "chunk_index";

/// A single retrieval hit.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkHit {
    pub score: f32,
    pub text: String,
    pub chunk_index: Option<i64>,
}

impl ChunkHit {
    /// Builds a hit from a search result. Points without a string `text`
    /// payload are skipped.
    pub fn from_payload(score: f32, payload: &Value) -> Option<Self> {
        let text = payload.get(TEXT_KEY)?.as_str()?.to_string();
        Some(Self {
            score,
            text,
            chunk_index: payload.get(INDEX_KEY).and_then(Value::as_i64),
        })
    }
}
