//! HTTP handlers

pub mod health;
pub mod status;
pub mod score;
pub mod history;
pub mod model;

use crate::AppError;

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
