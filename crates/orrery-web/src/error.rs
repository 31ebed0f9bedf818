use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Failures of `/api/ask`. Each maps to a fixed status and public message;
/// upstream detail is logged, never returned.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Missing or invalid 'prompt'")]
    InvalidPrompt,
    #[error("Server configuration error: GEMINI_API_KEY not set")]
    MissingCredential,
    #[error("upstream: {0}")]
    Upstream(#[from] UpstreamError),
}

impl AskError {
    pub fn status(&self) -> StatusCode {
        match self {
            AskError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AskError::InvalidPrompt => StatusCode::BAD_REQUEST,
            AskError::MissingCredential | AskError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            AskError::Upstream(_) => "AI service unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AskError {
    fn into_response(self) -> Response {
        match &self {
            AskError::Upstream(e) => log::error!("[api/ask] upstream error: {e}"),
            AskError::MissingCredential => log::error!("[api/ask] GEMINI_API_KEY is not set"),
            _ => log::debug!("[api/ask] rejected: {self}"),
        }
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
