//! Server error types with HTTP status code mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use podium_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Result type for handler functions
pub type Result<T> = std::result::Result<T, ServerError>;

/// Server error type that wraps store errors and provides HTTP status mapping
///
/// Validation failures never reach this type; the submission contract answers
/// them with the sentinel rank `0` inside a 200 response.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Store layer error
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Generic bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServerError {
    /// Create a bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Map error to a stable machine-readable kind
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Store(StoreError::Core(_)) => "invalid-world",
            ServerError::Store(StoreError::Catalog(_)) => "catalog",
            ServerError::Store(StoreError::Corruption(_)) => "corrupt-shard",
            ServerError::Store(StoreError::ShardRead(_)) => "shard-read",
            ServerError::Store(StoreError::Persist(_)) => "persist",
            ServerError::Store(_) => "internal",
            ServerError::BadRequest(_) => "bad-request",
            ServerError::Json(_) => "json-parse",
        }
    }

    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 - Bad Request (client errors)
            ServerError::Store(StoreError::Core(_)) => StatusCode::BAD_REQUEST,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Json(_) => StatusCode::BAD_REQUEST,

            // 500 - anything the storage layer could not complete
            ServerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: self.error_type(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
