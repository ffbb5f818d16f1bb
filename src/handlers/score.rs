//! Scoring handler

use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::{AppState, AppResult};
use crate::models::{SensorReading, Verdict};

/// Score one reading and record it in the history
pub async fn score(
    State(state): State<AppState>,
    payload: Result<Json<SensorReading>, JsonRejection>,
) -> AppResult<Json<Verdict>> {
    let Json(reading) = payload?;
    let verdict = state.service.submit(reading)?;

    Ok(Json(verdict))
}
