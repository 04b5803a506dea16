//! One-shot question from the terminal with a progress spinner.
//!
//! Usage: `ask "<question>" [k] [model]`
//!
//! `model` falls back to `ASK_MODEL`, then to the chat profile default.

use std::error::Error;
use std::sync::Arc;

use ai_llm_service::{
    LlmServiceProfiles,
    config::default_config::{config_chat, config_embedding},
    telemetry,
};
use chunk_store::{ChunkStore, LlmEmbedder, StoreConfig};
use rag_gate::{AskOptions, GateConfig, IndicatifProgress, Orchestrator, Outcome};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::WARN))
        .with(telemetry::layer())
        .init();

    let (question, opts) = parse_args(std::env::args().skip(1), std::env::var("ASK_MODEL").ok())?;

    let svc = Arc::new(LlmServiceProfiles::new(config_chat()?, config_embedding()?)?);
    let store_cfg = StoreConfig::from_env()?;
    let embedder = Arc::new(LlmEmbedder::new(svc.clone(), store_cfg.embedding_dim));
    let store = Arc::new(ChunkStore::new(store_cfg, embedder)?);
    let gate = Orchestrator::with_llm(svc, store, GateConfig::from_env()?);

    let prog = IndicatifProgress::spinner();
    let result = gate
        .ask_with_progress(&question, &opts, &prog)
        .await?;

    println!("{}", result.answer);
    if result.outcome == Outcome::Answered {
        println!("\n--- {} chunk(s), relevance {:.2} ---", result.chunks.len(), result.score.value());
        for (i, chunk) in result.chunks.iter().enumerate() {
            println!("[{}] {}", i + 1, chunk.trim());
        }
    }
    Ok(())
}

/// Splits `<question> [k] [model]`; `env_model` is used when no model argument is given.
fn parse_args(
    mut args: impl Iterator<Item = String>,
    env_model: Option<String>,
) -> Result<(String, AskOptions), Box<dyn Error>> {
    let question = args.next().ok_or("usage: ask \"<question>\" [k] [model]")?;
    let k = args.next().map(|raw| raw.parse::<u64>()).transpose()?;
    let model = args
        .next()
        .or(env_model)
        .filter(|m| !m.trim().is_empty());
    Ok((question, AskOptions { k, model }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> impl Iterator<Item = String> {
        v.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn model_argument_overrides_environment() {
        let (q, opts) = parse_args(
            args(&["Where is the Ashmolean?", "3", "llama-3.3-70b-versatile"]),
            Some("openai/gpt-oss-20b".into()),
        )
        .unwrap();
        assert_eq!(q, "Where is the Ashmolean?");
        assert_eq!(opts.k, Some(3));
        assert_eq!(opts.model.as_deref(), Some("llama-3.3-70b-versatile"));
    }

    #[test]
    fn model_falls_back_to_environment_then_profile() {
        let (_, opts) = parse_args(args(&["q", "5"]), Some("openai/gpt-oss-20b".into())).unwrap();
        assert_eq!(opts.model.as_deref(), Some("openai/gpt-oss-20b"));

        let (_, opts) = parse_args(args(&["q"]), None).unwrap();
        assert_eq!(opts.k, None);
        assert_eq!(opts.model, None);
    }

    #[test]
    fn missing_question_or_bad_k_is_an_error() {
        assert!(parse_args(args(&[]), None).is_err());
        assert!(parse_args(args(&["q", "many"]), None).is_err());
    }
}
