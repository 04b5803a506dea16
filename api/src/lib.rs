//! HTTP surface of the document Q&A backend.
//!
//! Routes:
//! - `POST /ask` runs one question through the gate; a refusal is a 200.
//! - `GET /history` lists the most recent questions.
//! - `GET /health` reports static configuration.

use std::sync::Arc;

pub mod error_handler;
mod middleware_layer;
mod routes;
pub mod shared;

use ai_llm_service::{
    LlmServiceProfiles,
    config::default_config::{config_chat, config_embedding},
};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use chunk_store::{ChunkStore, LlmEmbedder, StoreConfig};
use rag_gate::{GateConfig, Orchestrator};
use tokio::signal;
use tracing::{error, info};

use crate::{
    error_handler::AppError,
    routes::{ask::ask_route::ask, health_route::health, history_route::history},
    shared::{app_state::AppState, settings::ApiSettings},
};

/// Builds the router over an already wired state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/history", get(history))
        .route("/health", get(health))
        .layer(middleware::from_fn(middleware_layer::request_id::with_request_id))
        .with_state(state)
}

/// Wires every client from the environment and serves until Ctrl+C.
///
/// # Errors
/// Configuration problems, bind failures and fatal server errors.
pub async fn start() -> Result<(), AppError> {
    let settings = ApiSettings::from_env()?;

    let svc = Arc::new(LlmServiceProfiles::new(config_chat()?, config_embedding()?)?);
    let store_cfg = StoreConfig::from_env()?;
    let embedder = Arc::new(LlmEmbedder::new(svc.clone(), store_cfg.embedding_dim));
    let store = Arc::new(ChunkStore::new(store_cfg, embedder)?);
    let gate_cfg = GateConfig::from_env()?;

    info!(
        model = svc.default_chat_model(),
        collection = %gate_cfg.profile.collection,
        threshold = gate_cfg.threshold,
        k = gate_cfg.default_k,
        "gate configured"
    );

    let gate = Arc::new(Orchestrator::with_llm(svc, store, gate_cfg));
    let state = Arc::new(AppState::new(gate, settings.history_limit));

    let listener = tokio::net::TcpListener::bind(&settings.address)
        .await
        .map_err(|source| AppError::Bind {
            addr: settings.address.clone(),
            source,
        })?;
    info!(address = %settings.address, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
