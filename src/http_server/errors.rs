//! # API Errors
//!
//! Error types for the HTTP handlers. Every handler owns its failure
//! boundary by returning [`ApiResult`]; nothing escapes to a
//! framework-level handler and nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path identifier is not a canonical ObjectId
    #[error("Invalid product ID format")]
    InvalidId,

    /// Store call succeeded but affected zero documents
    #[error("{0}")]
    NotFound(&'static str),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store call failed
    #[error("{context}")]
    Database {
        context: &'static str,
        #[source]
        source: mongodb::error::Error,
    },
}

impl ApiError {
    /// Wrap a driver error with the operation it interrupted
    pub fn database(context: &'static str, source: mongodb::error::Error) -> Self {
        Self::Database { context, source }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
///
/// 4xx responses carry `message` only; 5xx responses additionally carry
/// the driver error's display string under `error`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let error = match err {
            ApiError::Database { source, .. } => Some(source.to_string()),
            _ => None,
        };
        Self {
            message: err.to_string(),
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database { context, source } = &self {
            tracing::error!(error = %source, "{}", context);
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
