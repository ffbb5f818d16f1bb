//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::logic::ScoringError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Model errors
    ModelUnavailable,

    // Request errors
    MalformedInput { status: StatusCode, message: String },

    // Resource errors
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ModelUnavailable => {
                tracing::warn!("Request refused: model not loaded");
                (StatusCode::SERVICE_UNAVAILABLE, "Anomaly model is not loaded")
            }
            AppError::MalformedInput { status, message } => {
                tracing::debug!("Malformed request: {}", message);
                (*status, message.as_str())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::ModelUnavailable => AppError::ModelUnavailable,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedInput {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
