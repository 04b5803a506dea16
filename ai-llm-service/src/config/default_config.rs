//! Default LLM configs resolved from environment variables.
//!
//! Two profiles are used by the backend:
//!
//! - **Chat**      → relevance scoring and answer composition
//! - **Embedding** → query vectors for the chunk store
//!
//! Every constructor has a `*_from` twin taking a lookup closure so callers
//! (and tests) can supply variables without touching the process environment.
//!
//! # Environment variables
//!
//! Chat:
//! - `LLM_KIND`         = `groq` (default) | `openai` | `ollama`
//! - `LLM_BASE_URL`     = OpenAI-compatible base URL (default per provider)
//! - `GROQ_API_KEY` or `LLM_API_KEY` = bearer token (optional)
//! - `LLM_MODEL`        = default model (default `openai/gpt-oss-20b`)
//! - `LLM_MAX_TOKENS`   = optional u32
//! - `LLM_TIMEOUT_SECS` = per-call timeout (default 60)
//!
//! Embedding:
//! - `EMBEDDING_KIND`   = provider (default `ollama`)
//! - `EMBEDDING_URL`    = base URL (default per provider)
//! - `EMBEDDING_API_KEY`= bearer token (optional)
//! - `EMBEDDING_MODEL`  = model (default `bge-m3`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_var, parse_opt, validate_http_endpoint},
};

/// Default chat model when `LLM_MODEL` is unset.
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-oss-20b";

/// Default embedding model when `EMBEDDING_MODEL` is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "bge-m3";

/// Chat profile from the process environment.
///
/// # Errors
/// See [`config_chat_from`].
pub fn config_chat() -> Result<LlmModelConfig, AiLlmError> {
    config_chat_from(&env_var)
}

/// Chat profile from an arbitrary variable lookup.
///
/// # Defaults
/// - provider `groq`, endpoint from [`LlmProvider::default_endpoint`]
/// - `temperature = None` (provider default)
/// - `timeout_secs = Some(60)`
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::InvalidFormat`] if `LLM_BASE_URL` is not http(s)
/// - [`ConfigError::InvalidNumber`] for malformed numeric values
pub fn config_chat_from(
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<LlmModelConfig, AiLlmError> {
    let provider = match lookup("LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::Groq,
    };
    let endpoint = lookup("LLM_BASE_URL").unwrap_or_else(|| provider.default_endpoint().into());
    validate_http_endpoint("LLM_BASE_URL", &endpoint)?;

    let model = lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.into());
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: lookup("GROQ_API_KEY").or_else(|| lookup("LLM_API_KEY")),
        max_tokens: parse_opt("LLM_MAX_TOKENS", lookup("LLM_MAX_TOKENS"), "expected u32")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(
            parse_opt("LLM_TIMEOUT_SECS", lookup("LLM_TIMEOUT_SECS"), "expected u64")?
                .unwrap_or(60),
        ),
    })
}

/// Embedding profile from the process environment.
///
/// # Errors
/// See [`config_embedding_from`].
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    config_embedding_from(&env_var)
}

/// Embedding profile from an arbitrary variable lookup.
///
/// # Defaults
/// - provider `ollama` at `http://localhost:11434/v1`
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
///
/// # Errors
/// Same classes as [`config_chat_from`].
pub fn config_embedding_from(
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<LlmModelConfig, AiLlmError> {
    let provider = match lookup("EMBEDDING_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::Ollama,
    };
    let endpoint = lookup("EMBEDDING_URL").unwrap_or_else(|| provider.default_endpoint().into());
    validate_http_endpoint("EMBEDDING_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider,
        model: lookup("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.into()),
        endpoint,
        api_key: lookup("EMBEDDING_API_KEY"),
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn chat_defaults_target_groq() {
        let cfg = config_chat_from(&vars(&[])).unwrap();
        assert_eq!(cfg.provider, LlmProvider::Groq);
        assert_eq!(cfg.endpoint, "https://api.groq.com/openai/v1");
        assert_eq!(cfg.model, DEFAULT_CHAT_MODEL);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.timeout_secs, Some(60));
    }

    #[test]
    fn chat_prefers_groq_key_and_reads_overrides() {
        let cfg = config_chat_from(&vars(&[
            ("GROQ_API_KEY", "gsk_1"),
            ("LLM_API_KEY", "sk_2"),
            ("LLM_MODEL", "llama-3.1-8b-instant"),
            ("LLM_MAX_TOKENS", "512"),
            ("LLM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("gsk_1"));
        assert_eq!(cfg.model, "llama-3.1-8b-instant");
        assert_eq!(cfg.max_tokens, Some(512));
        assert_eq!(cfg.timeout_secs, Some(5));
    }

    #[test]
    fn chat_rejects_bad_values() {
        assert!(config_chat_from(&vars(&[("LLM_BASE_URL", "ftp://x")])).is_err());
        assert!(config_chat_from(&vars(&[("LLM_MAX_TOKENS", "-1")])).is_err());
        assert!(config_chat_from(&vars(&[("LLM_KIND", "mystery")])).is_err());
    }

    #[test]
    fn embedding_defaults_to_local_ollama() {
        let cfg = config_embedding_from(&vars(&[])).unwrap();
        assert_eq!(cfg.provider, LlmProvider::Ollama);
        assert_eq!(cfg.endpoint, "http://localhost:11434/v1");
        assert_eq!(cfg.model, DEFAULT_EMBEDDING_MODEL);
    }
}
