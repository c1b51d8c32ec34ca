use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::content::parser::ParseError;
use crate::llm_client::LlmError;
use crate::wordpress::WordPressError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation attempted against a record outside the required lifecycle
    /// state (e.g. publishing a job that is still processing).
    #[error("{0}")]
    InvalidState(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Content generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Generation reply could not be parsed: {0}")]
    Parse(#[from] ParseError),

    #[error("WordPress error: {0}")]
    WordPress(#[from] WordPressError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidState(msg) => (StatusCode::BAD_REQUEST, "INVALID_STATE", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Parse(e) => {
                tracing::error!("Generation reply parse error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PARSE_ERROR",
                    e.to_string(),
                )
            }
            AppError::WordPress(e) => {
                tracing::error!("WordPress error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "WORDPRESS_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
