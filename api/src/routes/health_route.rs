//! GET /health: static service facts; no upstream is contacted.

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;

use crate::shared::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub domain: String,
    pub collection: String,
    pub threshold: f32,
    pub default_k: u64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> ApiResponse<HealthInfo> {
    let cfg = state.gate.config();
    ApiResponse::success(HealthInfo {
        service: "doc-qa-backend",
        version: env!("CARGO_PKG_VERSION"),
        domain: cfg.profile.domain.clone(),
        collection: cfg.profile.collection.clone(),
        threshold: cfg.threshold,
        default_k: cfg.default_k,
    })
}
