//! HTTP error responses.
//!
//! Two body shapes are in use: `{"error": "..."}` for plain lookups and
//! hero updates, `{"errors": ["..."]}` for validation of powers and links.
//! Malformed bodies follow the shape of the endpoint they were sent to.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::model::ValidationError;
use crate::storage::StorageError;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested row does not exist. 404 with `{"error"}`.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request or rejected field. 400 with `{"error"}`.
    #[error("{0}")]
    BadRequest(String),

    /// One or more fields failed validation. 400 with `{"errors"}`.
    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    /// A referenced row does not exist. 404 with `{"errors"}`.
    #[error("{}", .0.join("; "))]
    Unresolved(Vec<String>),

    /// Storage layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(vec![message.into()])
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Invalid(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Unresolved(errors) => {
                (StatusCode::NOT_FOUND, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::Storage(err) if err.is_constraint_violation() => {
                tracing::warn!(error = %err, "Write rejected by database constraint");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "errors": [err.to_string()] })),
                )
                    .into_response()
            }
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
