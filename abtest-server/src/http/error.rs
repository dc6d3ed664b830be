//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses `{"error": <code>, "message": <text>}`
//! with appropriate status codes. No error ever escapes the request it came from.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Domain validation failed (400)
    Validation(ValidationError),

    /// Request body could not be parsed (400)
    InvalidRequest { message: String },

    /// Datastore rejected the row (400)
    Constraint { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Query deadline exceeded (504)
    Timeout { seconds: u64 },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::InvalidRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "invalid_request",
                    "message": message
                }),
            ),
            Self::Constraint { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "constraint_violation",
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::Timeout { seconds } => {
                tracing::error!("Query timed out after {}s", seconds);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    json!({
                        "error": "timeout",
                        "message": format!("operation timed out after {} seconds", seconds)
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Constraint { message } => Self::Constraint { message },
            DbError::InvalidInput { message } => Self::InvalidRequest { message },
            DbError::Timeout { seconds } => Self::Timeout { seconds },
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}
