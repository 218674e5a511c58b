use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hearth_core::compatibility::ValidationResult;
use hearth_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hearth_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A house design that breaks compatibility rules and cannot be saved.
    #[error("Configuration violates {} compatibility rule(s)", .0.errors.len())]
    InvalidConfiguration(ValidationResult),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

type ErrorParts = (StatusCode, &'static str, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(&err),
            AppError::InvalidConfiguration(verdict) => {
                // Clients render these per field, so the full verdict goes back.
                let body = json!({
                    "error": "Invalid configuration",
                    "code": "INVALID_CONFIGURATION",
                    "validationErrors": verdict.errors,
                    "warnings": verdict.warnings,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }
            AppError::InternalError(msg) => internal(&msg),
        };

        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

fn core_parts(err: CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
    }
}

/// Log `detail` and hide it from the client.
fn internal(detail: &dyn std::fmt::Display) -> ErrorParts {
    tracing::error!(error = %detail, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map sqlx failures onto HTTP.
///
/// Unique violations (SQLSTATE 23505) on a constraint named `uq_*` become 409;
/// anything else the database reports is a 500.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            match db.constraint().filter(|c| c.starts_with("uq_")) {
                Some(constraint) => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                None => internal(db),
            }
        }
        other => internal(other),
    }
}
