use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::asr::AudioUpload;
use crate::error::GatewayError;
use crate::state::AppState;

/// Characters of transcript echoed into the success log line.
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub success: bool,
    pub message: String,
    pub transcription: String,
    pub original_filename: String,
}

/// `POST /upload-audio/`
///
/// The credential check runs before the body is touched, so an unconfigured
/// server answers 500 whatever the payload looks like.
#[tracing::instrument(skip_all, fields(upload_id = %Uuid::new_v4()))]
pub async fn upload_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, GatewayError> {
    let transcriber = state
        .transcriber
        .clone()
        .ok_or(GatewayError::NotConfigured)?;

    let multipart = multipart.map_err(|e| GatewayError::InvalidMultipart(e.body_text()))?;
    let upload = read_upload(multipart).await?;

    info!(
        filename = %upload.filename,
        user_id = %upload.user_id,
        report_type = %upload.report_type,
        bytes = upload.data.len(),
        backend = transcriber.name(),
        "Transcribing upload"
    );

    let transcription = transcriber.transcribe(&upload).await?;

    info!(
        filename = %upload.filename,
        preview = %preview(&transcription, PREVIEW_CHARS),
        "Transcription successful"
    );

    Ok(Json(TranscriptionResponse {
        success: true,
        message: format!("Successfully transcribed {}", upload.filename),
        transcription,
        original_filename: upload.filename,
    }))
}

/// Pull `file`, `userId` and `reportType` out of the form. Other fields are ignored.
pub async fn read_upload(mut multipart: Multipart) -> Result<AudioUpload, GatewayError> {
    let mut file = None;
    let mut user_id = None;
    let mut report_type = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .ok_or(GatewayError::MissingField("file"))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;
                file = Some((filename, data));
            }
            Some("userId") => {
                user_id = Some(
                    field
                        .text()
                        .await
                        .map_err(multipart_error)?,
                );
            }
            Some("reportType") => {
                report_type = Some(
                    field
                        .text()
                        .await
                        .map_err(multipart_error)?,
                );
            }
            other => {
                debug!(field = ?other, "Ignoring unexpected multipart field");
            }
        }
    }

    let (filename, data) = file.ok_or(GatewayError::MissingField("file"))?;
    Ok(AudioUpload {
        data,
        filename,
        user_id: user_id.ok_or(GatewayError::MissingField("userId"))?,
        report_type: report_type.ok_or(GatewayError::MissingField("reportType"))?,
    })
}

fn multipart_error(e: MultipartError) -> GatewayError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(e.body_text())
    } else {
        GatewayError::InvalidMultipart(e.body_text())
    }
}

/// First `max_chars` characters of `text`, with `...` appended when it was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
