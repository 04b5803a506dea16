//! Loads a plain-text export of the document into the configured collection.
//!
//! Usage: `ingest_text <file.txt> [chunk_chars]`

use std::error::Error;
use std::sync::Arc;

use ai_llm_service::{
    LlmServiceProfiles,
    config::default_config::{config_chat, config_embedding},
    telemetry,
};
use chunk_store::{ChunkStore, LlmEmbedder, StoreConfig, chunker::DEFAULT_CHUNK_CHARS};
use rag_gate::GateConfig;
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::INFO))
        .with(telemetry::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: ingest_text <file.txt> [chunk_chars]")?;
    let chunk_chars = match args.next() {
        Some(raw) => raw.parse()?,
        None => DEFAULT_CHUNK_CHARS,
    };

    let text = tokio::fs::read_to_string(&path).await?;
    let collection = GateConfig::from_env()?.profile.collection;

    let svc = Arc::new(LlmServiceProfiles::new(config_chat()?, config_embedding()?)?);
    let store_cfg = StoreConfig::from_env()?;
    let embedder = Arc::new(LlmEmbedder::new(svc, store_cfg.embedding_dim));
    let store = ChunkStore::new(store_cfg, embedder)?;

    let n = store.ingest_text(&collection, &text, chunk_chars).await?;
    info!(path = %path, collection = %collection, chunk_chars, points = n, "ingestion finished");
    Ok(())
}
