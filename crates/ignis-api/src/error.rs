//! Error types for ignis-api
//!
//! Every handler returns [`Result`]; the error side renders as
//! `{"error": {"category": ..., "message": ...}}` with a status derived
//! from the underlying error kind.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for ignis-api operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur in ignis-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// Error from ignis-core
    #[error("Core error: {0}")]
    Core(#[from] ignis_core::Error),

    /// Error from ignis-storage
    #[error("Storage error: {0}")]
    Storage(#[from] ignis_storage::Error),

    /// Listener or socket failure
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn core_status(err: &ignis_core::Error) -> (StatusCode, &'static str) {
    match err {
        ignis_core::Error::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
        ignis_core::Error::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        ignis_core::Error::Config { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
}

impl ApiError {
    /// Shorthand for a 400 naming the offending parameter.
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        ignis_core::Error::validation_field(field, message).into()
    }

    /// HTTP status and error category.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(e) | ApiError::Storage(ignis_storage::Error::Core(e)) => {
                core_status(e)
            }
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io"),
        }
    }

    /// Message safe to return to the client. Server-side details stay in the logs.
    pub fn public_message(&self) -> String {
        let inner = match self {
            ApiError::Core(e) | ApiError::Storage(ignis_storage::Error::Core(e)) => e,
            _ => return "internal server error".to_string(),
        };
        match inner {
            ignis_core::Error::Validation { message, .. } => message.clone(),
            ignis_core::Error::NotFound { what } => format!("{what} not found"),
            _ => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category) = self.classify();
        if status.is_server_error() {
            tracing::error!(error = %self, category, "request failed");
        } else {
            tracing::debug!(error = %self, category, "request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "category": category,
                "message": self.public_message(),
            }
        });
        (status, Json(body)).into_response()
    }
}
