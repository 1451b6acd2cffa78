//! Error types for spam-api
//!
//! Every error renders as `{"error": "..."}` with a status code per kind,
//! so request failures never take the process down.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use spam_rs::SpamError;
use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body is not a JSON object with a string `message`
    #[error("No message provided")]
    MalformedRequest,

    /// No model loaded yet
    #[error("Model not trained yet. Please run `spam-model train` first.")]
    ModelNotTrained,

    /// Reloading artifacts failed; the previous model is still served
    #[error("Failed to reload model: {0}")]
    Reload(SpamError),

    /// Classifier failure other than a missing model
    #[error("Classification failed: {0}")]
    Classification(SpamError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure inside the service itself, such as a panicked worker task
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest => StatusCode::BAD_REQUEST,
            ApiError::ModelNotTrained => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SpamError> for ApiError {
    fn from(e: SpamError) -> Self {
        match e {
            SpamError::ModelNotTrained => ApiError::ModelNotTrained,
            other => ApiError::Classification(other),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
