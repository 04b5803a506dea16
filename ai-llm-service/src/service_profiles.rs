//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Both HTTP clients are built eagerly at construction; nothing is global.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{ChatMessage, ChatRequest, ChatCompletions, LlmServiceProfiles};
//! use ai_llm_service::config::default_config::{config_chat, config_embedding};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::new(config_chat()?, config_embedding()?)?);
//!
//! let out = svc
//!     .complete(ChatRequest::new(vec![ChatMessage::user("Hello")]))
//!     .await?;
//! println!("{:?}", out.first_content());
//!
//! let emb = svc.embed("Radcliffe Camera").await?;
//! println!("Embedding dim = {}", emb.len());
//! # Ok(()) }
//! ```

use crate::{
    chat::{BoxFuture, ChatCompletion, ChatCompletions, ChatRequest},
    config::llm_model_config::LlmModelConfig,
    error_handler::AiLlmError,
    services::open_ai_service::OpenAiService,
};

/// Bundle of the chat and embedding clients.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    chat: OpenAiService,
    embedding: OpenAiService,
}

impl LlmServiceProfiles {
    /// Creates both clients.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client cannot be constructed.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(Self {
            chat: OpenAiService::new(chat)?,
            embedding: OpenAiService::new(embedding)?,
        })
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the call fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embeddings(input).await
    }

    /// Default chat model id.
    pub fn default_chat_model(&self) -> &str {
        &self.chat.config().model
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (self.chat.config(), self.embedding.config())
    }
}

impl ChatCompletions for LlmServiceProfiles {
    fn complete<'a>(
        &'a self,
        request: ChatRequest,
    ) -> BoxFuture<'a, Result<ChatCompletion, AiLlmError>> {
        self.chat.complete(request)
    }
}
