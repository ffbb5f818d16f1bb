//! Model metadata handler

use axum::{extract::State, Json};

use crate::{AppError, AppResult, AppState};
use crate::logic::model::ModelInfo;

pub async fn info(State(state): State<AppState>) -> AppResult<Json<ModelInfo>> {
    let info = state.service.model_info().ok_or(AppError::ModelUnavailable)?;
    Ok(Json(info.clone()))
}
