use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend flavour behind an OpenAI-compatible endpoint.
///
/// Every provider speaks the same `/chat/completions` and `/embeddings`
/// wire format; the variant only decides the default base URL and shows up
/// in logs.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let p: LlmProvider = "groq".parse().unwrap();
/// assert_eq!(p, LlmProvider::Groq);
/// assert_eq!(p.default_endpoint(), "https://api.groq.com/openai/v1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Groq's hosted OpenAI-compatible API.
    Groq,
    /// OpenAI's API.
    OpenAI,
    /// Local Ollama runtime through its `/v1` compatibility layer.
    Ollama,
}

impl LlmProvider {
    /// Base URL used when no explicit endpoint is configured.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            LlmProvider::Groq => "https://api.groq.com/openai/v1",
            LlmProvider::OpenAI => "https://api.openai.com/v1",
            LlmProvider::Ollama => "http://localhost:11434/v1",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers_case_insensitively() {
        assert_eq!("OpenAI".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert_eq!(" ollama ".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert!(matches!(
            "anthropic".parse::<LlmProvider>(),
            Err(ConfigError::UnsupportedProvider(p)) if p == "anthropic"
        ));
    }
}
