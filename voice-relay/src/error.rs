//! HTTP-facing error type. Every variant renders as `{"error": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::tts::TtsError;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing or malformed request field
    #[error("{0}")]
    Validation(String),

    /// Credentials for the requested provider were not supplied at startup
    #[error("{0}")]
    Configuration(String),

    #[error("Request timed out. Please try again.")]
    UpstreamTimeout,

    /// Provider answered with an error status or an unusable body
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl From<TtsError> for RelayError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::Timeout => Self::UpstreamTimeout,
            TtsError::Api { status, message } => Self::Upstream { status, message },
            TtsError::InvalidResponse => Self::Upstream {
                status: 500,
                message: err.to_string(),
            },
            TtsError::Network(_) | TtsError::Internal(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{} -> {}", status.as_u16(), self);
        } else {
            log::debug!("{} -> {}", status.as_u16(), self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
