//! Error types for the book catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::book::ValidationFailure;

/// User-facing message for a create that targets an occupied ISBN. The
/// wording deliberately does not reveal whether the ISBN is taken; the
/// internal [`ErrorCode`] still records the real cause.
pub const DUPLICATE_ISBN_MESSAGE: &str =
    "A book with the same ISBN-13 already exists or invalid data provided.";

/// Internal error codes carried in logs and error bodies. `Duplicate` and
/// `BadValue` are separate codes even though both render as a 400, so the
/// two causes stay distinguishable off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchBook = 4,
    Duplicate = 5,
    BadValue = 6,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Field-level failures from the validation rules. Always caused by the
    /// request body, never by the server; rendered as the violations array.
    #[error("Validation failed")]
    Validation(Vec<ValidationFailure>),

    /// A create targeted an ISBN that is already occupied. The payload is
    /// the internal detail; the response body carries
    /// [`DUPLICATE_ISBN_MESSAGE`].
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for non-validation failures
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(failures) => {
                tracing::debug!(
                    code = ErrorCode::BadValue as u32,
                    "validation failed with {} violation(s)",
                    failures.len()
                );
                (StatusCode::BAD_REQUEST, Json(failures)).into_response()
            }
            AppError::Conflict(detail) => {
                tracing::debug!(code = ErrorCode::Duplicate as u32, "conflict: {}", detail);
                let failures = vec![ValidationFailure {
                    property_name: "isbn".to_string(),
                    error_message: DUPLICATE_ISBN_MESSAGE.to_string(),
                }];
                (StatusCode::BAD_REQUEST, Json(failures)).into_response()
            }
            AppError::Authentication(msg) => {
                error_response(StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg)
            }
            AppError::NotFound(msg) => {
                error_response(StatusCode::NOT_FOUND, ErrorCode::NoSuchBook, msg)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

fn error_response(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: code as u32,
        error: format!("{:?}", code),
        message,
    });

    (status, body).into_response()
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
