//! Server error types.

use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use task_store::TaskStoreError;

/// Machine-readable codes carried in the error envelope.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Message sent for every 404.
pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";

/// Message sent for every 500; the cause is only logged.
pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request body or parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Route or resource not found.
    #[error("Not found")]
    NotFound,

    /// Route exists but not for this method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(Method),

    /// Repository error.
    #[error("Store error: {0}")]
    Store(#[from] TaskStoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_REQUEST,
                msg.clone(),
            ),
            ServerError::NotFound => (
                StatusCode::NOT_FOUND,
                error_codes::RESOURCE_NOT_FOUND,
                NOT_FOUND_MESSAGE.to_string(),
            ),
            ServerError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                error_codes::METHOD_NOT_ALLOWED,
                format!("the {method} method is not supported for this resource"),
            ),
            ServerError::Store(e) if e.is_not_found() => {
                tracing::debug!(error = %e, "Record not found");
                (
                    StatusCode::NOT_FOUND,
                    error_codes::RESOURCE_NOT_FOUND,
                    NOT_FOUND_MESSAGE.to_string(),
                )
            }
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
