//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use extractor::ExtractorError;
use serde_json::json;
use shared::SharedError;
use thiserror::Error;
use tracing::warn;

pub type WebServerResult<T> = Result<T, WebServerError>;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed: {message}")]
    Startup { message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] SharedError),

    #[error(transparent)]
    Extraction(#[from] ExtractorError),
}

impl WebServerError {
    pub fn startup(message: impl Into<String>) -> Self {
        Self::Startup {
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::Startup { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            WebServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WebServerError::Extraction(err) => match err {
                // threshold breaches and upstream trouble are the provider
                // side's fault, not the caller's
                ExtractorError::Orchestration { .. }
                | ExtractorError::Transport { .. }
                | ExtractorError::Provider { .. }
                | ExtractorError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
                ExtractorError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!(status = status.as_u16(), error = %self, "request failed");

        let mut body = json!({
            "success": false,
            "error": self.to_string(),
        });

        if let WebServerError::Extraction(ExtractorError::Orchestration { failures, .. }) = &self {
            body["workstreamResults"] = json!(failures);
        }

        (status, Json(body)).into_response()
    }
}
