use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use v0mon_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `v0mon_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned in place of any internal detail.
const SANITIZED_MESSAGE: &str = "An internal error occurred";

/// Message returned for any generation failure; the detail is only logged.
const GENERATION_FAILED_MESSAGE: &str = "Failed to generate the creature";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidHandle(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_HANDLE", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Configuration(msg) => {
                    tracing::error!(error = %msg, "Configuration error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIGURATION_ERROR",
                        msg.clone(),
                    )
                }
                CoreError::Generation(msg) => {
                    tracing::error!(error = %msg, "Generation error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "GENERATION_ERROR",
                        GENERATION_FAILED_MESSAGE.to_string(),
                    )
                }
                CoreError::Persistence(msg) => {
                    tracing::error!(error = %msg, "Persistence error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "PERSISTENCE_ERROR",
                        "Failed to save the generated creature, please retry".to_string(),
                    )
                }
                CoreError::NotFound { entity, key } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} '{key}' not found"),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        SANITIZED_MESSAGE.to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    SANITIZED_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if v0mon_db::is_unique_violation(err) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                SANITIZED_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                SANITIZED_MESSAGE.to_string(),
            )
        }
    }
}
