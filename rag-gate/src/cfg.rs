//! Gate configuration loaded from environment variables.

use ai_llm_service::error_handler::{env_var, parse_opt, validate_range_f32};
use ai_llm_service::{AiLlmError, ConfigError};
use chunk_store::MAX_TOP_K;

/// Default refusal threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.8;
/// Default number of chunks retrieved per answered query.
pub const DEFAULT_TOP_K: u64 = 8;
/// Largest `k` a caller may ask for.
pub const MAX_RETRIEVAL_K: u64 = MAX_TOP_K;

/// The single indexed document the gate answers about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentProfile {
    /// Subject used in prompts and the refusal text, e.g. `Oxford`.
    pub domain: String,
    /// Source document title, e.g. `Oxford Guide-2022.pdf`.
    pub title: String,
    /// Vector collection holding the document's chunks.
    pub collection: String,
}

impl Default for DocumentProfile {
    fn default() -> Self {
        Self {
            domain: "Oxford".into(),
            title: "Oxford Guide-2022.pdf".into(),
            collection: "Oxford-Guide-2022".into(),
        }
    }
}

impl DocumentProfile {
    pub fn default_refusal(&self) -> String {
        format!(
            "The question is irrelevant to {}. Please come back with a relevant question.",
            self.domain
        )
    }
}

/// Knobs of the orchestrator.
#[derive(Clone, Debug, PartialEq)]
pub struct GateConfig {
    /// Scores below this are refused; equal passes.
    pub threshold: f32,
    /// `k` used when the caller does not pass one.
    pub default_k: u64,
    pub profile: DocumentProfile,
    /// Answer returned for refused queries.
    pub refusal: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        let profile = DocumentProfile::default();
        Self {
            threshold: DEFAULT_THRESHOLD,
            default_k: DEFAULT_TOP_K,
            refusal: profile.default_refusal(),
            profile,
        }
    }
}

impl GateConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    /// See [`GateConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::from_lookup(&env_var)
    }

    /// Reads `RAG_COLLECTION`, `DOC_DOMAIN`, `DOC_TITLE`, `RAG_THRESHOLD`,
    /// `RAG_TOP_K` and `RAG_REFUSAL` through `lookup`.
    ///
    /// # Errors
    /// `InvalidNumber` for unparsable numbers, `OutOfRange` for values that
    /// parse but violate their bounds. Nothing is silently defaulted.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, AiLlmError> {
        let dflt = DocumentProfile::default();
        let profile = DocumentProfile {
            domain: lookup("DOC_DOMAIN").unwrap_or(dflt.domain),
            title: lookup("DOC_TITLE").unwrap_or(dflt.title),
            collection: lookup("RAG_COLLECTION").unwrap_or(dflt.collection),
        };

        let cfg = Self {
            threshold: parse_opt("RAG_THRESHOLD", lookup("RAG_THRESHOLD"), "expected f32")?
                .unwrap_or(DEFAULT_THRESHOLD),
            default_k: parse_opt("RAG_TOP_K", lookup("RAG_TOP_K"), "expected u64")?
                .unwrap_or(DEFAULT_TOP_K),
            refusal: lookup("RAG_REFUSAL").unwrap_or_else(|| profile.default_refusal()),
            profile,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AiLlmError> {
        validate_range_f32("RAG_THRESHOLD", self.threshold, 0.0, 1.0)?;
        if !(1..=MAX_RETRIEVAL_K).contains(&self.default_k) {
            return Err(ConfigError::OutOfRange {
                field: "RAG_TOP_K",
                detail: "expected 1..=20",
            }
            .into());
        }
        if self.profile.collection.trim().is_empty() {
            return Err(ConfigError::InvalidFormat {
                var: "RAG_COLLECTION",
                reason: "must not be empty",
            }
            .into());
        }
        Ok(())
    }
}
