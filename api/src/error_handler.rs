use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rag_gate::{GateError, ServiceError};
use thiserror::Error;
use tracing::{error, warn};

use crate::shared::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything the gate pipeline reported.
    #[error(transparent)]
    Gate(#[from] GateError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Gate(e) => match e {
                GateError::EmptyQuery | GateError::InvalidRetrievalCount { .. } => {
                    StatusCode::BAD_REQUEST
                }
                GateError::ScoreParse { .. } => StatusCode::BAD_GATEWAY,
                GateError::CollectionNotFound { .. } => StatusCode::SERVICE_UNAVAILABLE,
                GateError::Service(ServiceError::Llm(ai_llm_service::AiLlmError::Timeout(_))) => {
                    StatusCode::GATEWAY_TIMEOUT
                }
                GateError::Service(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Gate(e) => match e {
                GateError::EmptyQuery => "EMPTY_QUERY",
                GateError::InvalidRetrievalCount { .. } => "INVALID_RETRIEVAL_COUNT",
                GateError::ScoreParse { .. } => "SCORE_PARSE_FAILED",
                GateError::CollectionNotFound { .. } => "COLLECTION_NOT_FOUND",
                GateError::Service(ServiceError::Llm(ai_llm_service::AiLlmError::Timeout(_))) => {
                    "UPSTREAM_TIMEOUT"
                }
                GateError::Service(_) => "UPSTREAM_SERVICE",
            },
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Gate(GateError::CollectionNotFound { .. }) => {
                Some("The document has not been indexed; run ingestion or check RAG_COLLECTION.")
            }
            AppError::Gate(GateError::InvalidRetrievalCount { .. }) => Some("k must be within 1..=20."),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        if status.is_server_error() {
            error!(code, error = %self, "request failed");
        } else {
            warn!(code, error = %self, "request rejected");
        }
        ApiResponse::<()>::error(code, self.to_string(), self.hint()).into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<ai_llm_service::AiLlmError> for AppError {
    fn from(err: ai_llm_service::AiLlmError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<chunk_store::ChunkStoreError> for AppError {
    fn from(err: chunk_store::ChunkStoreError) -> Self {
        AppError::Config(err.to_string())
    }
}
