//! Recent scores handler

use axum::{extract::{Query, State}, Json};

use crate::AppState;
use crate::models::{RecentScore, RecentScoresFilter};

/// Latest scored readings, oldest first. An unreadable query falls back to the configured limit.
pub async fn recent_scores(
    State(state): State<AppState>,
    filter: Option<Query<RecentScoresFilter>>,
) -> Json<Vec<RecentScore>> {
    let limit = filter
        .and_then(|Query(f)| f.limit)
        .unwrap_or(state.config.recent_limit);

    let rows = state
        .service
        .recent_history(limit)
        .iter()
        .map(RecentScore::from)
        .collect();

    Json(rows)
}
