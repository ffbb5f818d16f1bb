//! Sensor Anomaly Service
//!
//! Scores temperature / humidity / sound readings against a pre-trained
//! isolation forest and keeps a bounded history of recent verdicts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  SENSOR ANOMALY SERVICE                  │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────────┐    │
//! │  │  API      │   │  ScoringService                  │    │
//! │  │  (Axum)   │──▶│   ├─ ModelHandle (read-only)     │    │
//! │  │           │   │   ├─ Scorer (pure)               │    │
//! │  └───────────┘   │   └─ HistoryBuffer (mutex FIFO)  │    │
//! │                  └──────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use logic::ScoringService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ScoringService>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(service: ScoringService, config: config::Config) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/status", get(handlers::status::status))
        .route("/score", post(handlers::score::score))
        .route("/recent_scores", get(handlers::history::recent_scores))
        .route("/model", get(handlers::model::info))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
