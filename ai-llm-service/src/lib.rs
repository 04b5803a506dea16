//! Shared LLM service for the document Q&A backend.
//!
//! Talks to OpenAI-compatible endpoints (Groq, OpenAI, local Ollama `/v1`) for
//! two things only: non-streaming chat completions and embeddings.
//!
//! - [`chat`] holds the wire-agnostic request/response types and the
//!   [`chat::ChatCompletions`] capability trait used by the pipeline.
//! - [`services::open_ai_service`] is the HTTP client.
//! - [`service_profiles`] bundles the `chat` and `embedding` profiles.
//! - [`telemetry`] has tracing layer/filter helpers for binaries.

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use chat::{BoxFuture, ChatChoice, ChatCompletion, ChatCompletions, ChatMessage, ChatRequest, ChatRole};
pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use service_profiles::LlmServiceProfiles;
