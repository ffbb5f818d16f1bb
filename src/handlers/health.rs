//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::models::HistoryStats;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    history: HistoryStats,
    timestamp: i64,
}

/// Liveness probe; answers whether or not a model is loaded
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.service.status().model_loaded,
        history: state.service.history_stats(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
