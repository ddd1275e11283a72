//! Error type for the HTTP layer.
//!
//! Handlers return `Result<T, GatewayError>`. Every variant renders as a JSON
//! `{"detail": "..."}` body so clients see one envelope shape for all failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::asr::TranscriptionError;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No credential for the transcription service.
    #[error("API Key for transcription service is not configured.")]
    NotConfigured,

    /// The upstream call failed for any reason.
    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    /// A required multipart field was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The multipart body could not be read.
    #[error("invalid multipart body: {0}")]
    InvalidMultipart(String),

    /// The body exceeded the configured upload limit.
    #[error("upload too large: {0}")]
    PayloadTooLarge(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::NotConfigured | GatewayError::Transcription(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::InvalidMultipart(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Upload failed");
        }
        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
