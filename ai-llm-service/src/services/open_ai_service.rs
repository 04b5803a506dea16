//! OpenAI-compatible service for chat completions and embeddings.
//!
//! Minimal, non-streaming client around the OpenAI REST shape, which Groq and
//! Ollama (`/v1`) also speak. Endpoints are derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/chat/completions: chat completion (non-streaming)
//! - POST {endpoint}/embeddings      : embeddings retrieval
//!
//! Constructor validation:
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.api_key` is optional; it is sent as a bearer token when present
//!
//! No retries are performed. Errors are normalized via `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, info};

use crate::{
    chat::{BoxFuture, ChatCompletion, ChatCompletions, ChatMessage, ChatRequest},
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet},
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Thin client for an OpenAI-compatible API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (timeout + default headers) that is safe
/// to share across concurrent requests.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    timeout: Duration,
    url_chat: String,
    url_embeddings: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::Provider`] with `Decode` if the API key is not a valid header value
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Chat,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut headers = header::HeaderMap::new();
        if let Some(key) = cfg.api_key.as_deref() {
            let value = header::HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                ProviderError::new(
                    Provider::Chat,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(AiLlmError::HttpTransport)?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{base}/chat/completions");
        let url_embeddings = format!("{base}/embeddings");

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            has_api_key = cfg.api_key.is_some(),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            timeout,
            url_chat,
            url_embeddings,
        })
    }

    /// Profile this client was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// Returns every choice the provider sent; an empty `choices` array is not
    /// an error at this layer.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses (auth, quota, 5xx)
    /// - [`AiLlmError::Timeout`] when the per-call timeout expires
    /// - [`AiLlmError::HttpTransport`] for other client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatCompletion, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionBody::from_cfg(&self.cfg, request);
        debug!(model = %body.model, messages = body.messages.len(), "chat request");

        let out: ChatCompletion = self.post_json(Provider::Chat, &self.url_chat, &body).await?;

        info!(
            model = %body.model,
            choices = out.choices.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "chat completion completed"
        );
        Ok(out)
    }

    /// Retrieves a single embeddings vector via `/embeddings`.
    ///
    /// # Errors
    /// Same classes as [`OpenAiService::chat`], plus `EmptyEmbedding` when the
    /// provider returns no vector.
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let started = Instant::now();
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };

        let out: EmbeddingsResponse = self
            .post_json(Provider::Embeddings, &self.url_embeddings, &body)
            .await?;
        let first = out.data.into_iter().next().ok_or_else(|| {
            ProviderError::new(Provider::Embeddings, ProviderErrorKind::EmptyEmbedding)
        })?;

        debug!(
            model = %self.cfg.model,
            input_len = input.len(),
            dim = first.embedding.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "embeddings completed"
        );
        Ok(first.embedding)
    }

    /// POSTs `body` and decodes a 2xx JSON answer; everything else becomes a
    /// provider-scoped error.
    async fn post_json<B, T>(&self, provider: Provider, url: &str, body: &B) -> Result<T, AiLlmError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AiLlmError::from_transport(e, self.timeout))?;

        let status = resp.status();
        if !status.is_success() {
            let snippet = make_snippet(&resp.text().await.unwrap_or_default());
            error!(%status, %url, %snippet, ?provider, "upstream returned non-success status");
            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url: url.to_string(),
                    snippet,
                }),
            )
            .into());
        }

        resp.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                return AiLlmError::Timeout(self.timeout);
            }
            error!(error = %e, %url, ?provider, "failed to decode upstream response");
            ProviderError::new(provider, ProviderErrorKind::Decode(e.to_string())).into()
        })
    }
}

impl ChatCompletions for OpenAiService {
    fn complete<'a>(
        &'a self,
        request: ChatRequest,
    ) -> BoxFuture<'a, Result<ChatCompletion, AiLlmError>> {
        Box::pin(async move { self.chat(&request).await })
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionBody<'a> {
    /// Per-request model wins over the profile default.
    fn from_cfg(cfg: &'a LlmModelConfig, request: &'a ChatRequest) -> Self {
        Self {
            model: request.model.as_deref().unwrap_or(&cfg.model),
            messages: &request.messages,
            stream: false,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

/// Request body for `/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Response body for `/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}
