//! Application error type shared by every layer.
//!
//! Each variant maps to one failure kind a caller can act on. `NotFound` and
//! `Expired` are kept apart because a client retries neither but reacts to
//! them differently.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::url_normalizer::UrlNormalizationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to HTTP clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Expired { message: String, details: Value },

    #[error("{message}")]
    Collision { message: String, details: Value },

    #[error("{message}")]
    Store { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn collision(message: impl Into<String>, details: Value) -> Self {
        Self::Collision {
            message: message.into(),
            details,
        }
    }
    pub fn store(message: impl Into<String>, details: Value) -> Self {
        Self::Store {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Expired { .. } => "expired",
            AppError::Collision { .. } => "shortcode_collision",
            AppError::Store { .. } => "store_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::Collision { .. } => StatusCode::CONFLICT,
            AppError::Store { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Expired { message, details }
            | AppError::Collision { message, details }
            | AppError::Store { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found", json!({})),
            sqlx::Error::PoolTimedOut => AppError::store(
                "Timed out waiting for a database connection",
                json!({ "retryable": true }),
            ),
            other => {
                tracing::error!("Database error: {}", other);
                AppError::store("Database error", json!({ "retryable": true }))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let field_errors = e.field_errors();
        let fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "reason": e.to_string() }),
        )
    }
}

impl From<UrlNormalizationError> for AppError {
    fn from(e: UrlNormalizationError) -> Self {
        AppError::bad_request(
            "Invalid URL",
            json!({ "kind": e.kind(), "reason": e.to_string() }),
        )
    }
}
