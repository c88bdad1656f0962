use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::common::response::ApiResponse;
use crate::common::validation::FieldError;
use crate::infrastructure::db::store::StoreError;

/// Every failure a handler can report. Domain outcomes (not found, invalid
/// payload, ownership) are plain variants; store and adapter failures are
/// wrapped and sanitized on the way out.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("One or more validation errors occurred")]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let internal = || {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            )
        };

        let (status, code, message, errors) = match self {
            AppError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
                None,
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "One or more validation errors occurred".to_string(),
                Some(errors),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            AppError::Store(StoreError::UniqueViolation(detail)) => {
                tracing::warn!(error = %detail, "Unique constraint rejected write");
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "The record already exists".to_string(),
                    None,
                )
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                internal()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                internal()
            }
        };

        let body = ApiResponse::<()>::error(code, &message, errors);
        (status, Json(body)).into_response()
    }
}
