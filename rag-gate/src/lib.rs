//! Confidence-gated RAG over a single indexed document.
//!
//! Public entry point: [`Orchestrator::ask`]. It asks the model how relevant
//! the question is to the configured document, refuses below the threshold,
//! and otherwise retrieves top-k chunks from `chunk-store` and composes a
//! grounded answer from them.
//!
//! Each collaborator sits behind a small trait ([`RelevanceScorer`],
//! [`ChunkRetriever`], [`AnswerComposer`]) and is injected as `Arc<dyn ...>`.

mod api_types;
mod cfg;
mod composer;
mod error;
mod orchestrator;
mod progress;
pub mod prompt;
mod retriever;
mod scorer;

pub use api_types::{AskOptions, ConfidenceScore, Outcome, Query, QueryResult};
pub use cfg::{DEFAULT_THRESHOLD, DEFAULT_TOP_K, DocumentProfile, GateConfig, MAX_RETRIEVAL_K};
pub use composer::{AnswerComposer, LlmAnswerComposer};
pub use error::{GateError, ServiceError};
pub use orchestrator::Orchestrator;
pub use progress::{IndicatifProgress, NoopProgress, Progress};
pub use retriever::ChunkRetriever;
pub use scorer::{LlmRelevanceScorer, RelevanceScorer, parse_confidence};
