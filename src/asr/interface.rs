use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::StatusCode;

/// One uploaded audio file and the form fields that came with it. Lives for a single request.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub data: Bytes,
    /// Original filename. The upstream infers the audio format from its extension.
    pub filename: String,
    pub user_id: String,
    /// Accepted and passed through untouched; nothing downstream reads it yet.
    pub report_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("request to transcription service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("transcription service returned {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },
    #[error("invalid response from transcription service: {0}")]
    InvalidResponse(String),
    #[error("invalid upload: {0}")]
    InvalidInput(String),
}

/// Speech-to-text backend. Implementations are shared across requests and must be stateless.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the uploaded audio and return the transcript text.
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String, TranscriptionError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
