use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{Body, Client};
use serde::Deserialize;
use tracing::debug;

use super::interface::{AudioUpload, Transcriber, TranscriptionError};

/// Client for an OpenAI-compatible `/audio/transcriptions` endpoint.
pub struct OpenAiWhisperClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    text: String,
}

impl OpenAiWhisperClient {
    pub fn new(client: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }
}

/// MIME type for the outbound file part, guessed from the filename extension.
pub fn mime_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" | "mpga" | "mpeg" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "mp4" => "video/mp4",
        "webm" => "audio/webm",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl Transcriber for OpenAiWhisperClient {
    async fn transcribe(&self, upload: &AudioUpload) -> Result<String, TranscriptionError> {
        // `Bytes` clone shares the upload buffer instead of copying it
        let body = Body::from(upload.data.clone());
        let file_part = multipart::Part::stream_with_length(body, upload.data.len() as u64)
            .file_name(upload.filename.clone())
            .mime_str(mime_for_filename(&upload.filename))
            .map_err(|e| TranscriptionError::InvalidInput(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", file_part);

        debug!(
            model = %self.model,
            filename = %upload.filename,
            bytes = upload.data.len(),
            "Sending audio to transcription service"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::UpstreamStatus { status, body });
        }

        let body = response.text().await?;
        let parsed: TranscriptionBody = serde_json::from_str(&body)
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        debug!(chars = parsed.text.len(), "Transcription service responded");
        Ok(parsed.text)
    }

    fn name(&self) -> &str {
        "openai_whisper"
    }
}
