use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use rag_gate::{Orchestrator, Outcome, QueryResult};
use serde::Serialize;
use tokio::sync::RwLock;

/// Default number of recent questions kept for `GET /history`.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// One answered or refused question, as shown to the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub question: String,
    pub answer: String,
    pub outcome: Outcome,
    pub collection: String,
    /// RFC3339 UTC.
    pub asked_at: String,
}

/// Shared state for all HTTP handlers.
///
/// The history lives here, at the caller; the pipeline never sees it.
pub struct AppState {
    pub gate: Arc<Orchestrator>,
    history: RwLock<VecDeque<HistoryEntry>>,
    history_limit: usize,
}

impl AppState {
    pub fn new(gate: Arc<Orchestrator>, history_limit: usize) -> Self {
        Self {
            gate,
            history: RwLock::new(VecDeque::with_capacity(history_limit)),
            history_limit,
        }
    }

    /// Pushes a finished query to the front, dropping the oldest beyond the limit.
    pub async fn record(&self, result: &QueryResult) {
        if self.history_limit == 0 {
            return;
        }
        let entry = HistoryEntry {
            question: result.query.to_string(),
            answer: result.answer.clone(),
            outcome: result.outcome,
            collection: self.gate.config().profile.collection.clone(),
            asked_at: Utc::now().to_rfc3339(),
        };
        let mut history = self.history.write().await;
        history.push_front(entry);
        history.truncate(self.history_limit);
    }

    /// Most recent first.
    pub async fn recent(&self) -> Vec<HistoryEntry> {
        self.history.read().await.iter().cloned().collect()
    }
}
