//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::model::ModelError;

/// Errors surfaced to HTTP callers.
///
/// The scoring engine itself never fails; everything here comes from the
/// request boundary or a collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body missing, malformed, or `text` absent / not a string.
    #[error("Text is required")]
    MissingText,

    /// Route requires an authenticated caller.
    #[error("Authentication required")]
    Unauthorized,

    /// Model API still rate limited after retries.
    #[error("Model API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Any other model failure.
    #[error("Failed to analyze sentiment: {0}")]
    Model(String),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::MissingText => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::RateLimited => Self::RateLimited,
            other => Self::Model(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
