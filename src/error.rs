//! Error handling
//!
//! Domain taxonomy: validation failures abort a request before the classifier
//! runs, classifier failures abort with no silent default, and database
//! failures on the assessment write path are reported without invalidating an
//! already-computed response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::model::ClassifierError;

pub type AppResult<T> = Result<T, AppError>;

// ============================================================================
// DOMAIN ERRORS
// ============================================================================

/// Malformed assessment input, detected before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` must be numeric")]
    NotNumeric(&'static str),

    #[error("field `{0}` must be a finite number")]
    NotFinite(&'static str),

    #[error("request body must be a JSON object")]
    NotAnObject,
}

// ============================================================================
// HTTP ERROR
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    // Validation errors
    ValidationError(String),

    // Classifier capability errors
    ClassifierError(String),

    // Database errors
    DatabaseError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::ClassifierError(msg) => {
                tracing::error!("Classifier error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Classifier error")
            }
            AppError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<ClassifierError> for AppError {
    fn from(err: ClassifierError) -> Self {
        AppError::ClassifierError(err.to_string())
    }
}
