//! GET /history: recent questions, newest first.

use std::sync::Arc;

use axum::extract::State;

use crate::shared::{
    app_state::{AppState, HistoryEntry},
    http::response_envelope::ApiResponse,
};

pub async fn history(State(state): State<Arc<AppState>>) -> ApiResponse<Vec<HistoryEntry>> {
    ApiResponse::success(state.recent().await)
}
