//! Service status handler

use axum::{extract::State, Json};

use crate::AppState;
use crate::logic::ServiceStatus;

pub async fn status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(state.service.status())
}
