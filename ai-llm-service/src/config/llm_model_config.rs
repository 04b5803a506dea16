use crate::config::llm_provider::LlmProvider;

/// Configuration for one model profile (chat or embedding).
///
/// # Fields
///
/// - `provider`: backend flavour (Groq, OpenAI, Ollama).
/// - `model`: default model identifier, overridable per chat request.
/// - `endpoint`: OpenAI-compatible base URL, e.g. `https://api.groq.com/openai/v1`.
/// - `api_key`: optional bearer token. A missing or wrong key is only
///   observed as a failed call; it is never validated up front.
/// - `max_tokens`, `temperature`, `top_p`: optional sampling knobs.
/// - `timeout_secs`: per-request timeout applied on the HTTP client.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Groq,
///     model: "openai/gpt-oss-20b".to_string(),
///     endpoint: "https://api.groq.com/openai/v1".to_string(),
///     api_key: Some("gsk_...".to_string()),
///     max_tokens: None,
///     temperature: None,
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.timeout_secs, Some(60));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The backend flavour.
    pub provider: LlmProvider,

    /// Default model identifier.
    pub model: String,

    /// OpenAI-compatible base URL (without `/chat/completions`).
    pub endpoint: String,

    /// Optional bearer token.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
