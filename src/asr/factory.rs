use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use super::interface::Transcriber;
use super::openai_whisper::OpenAiWhisperClient;
use crate::config::{TranscriptionConfig, API_KEY_ENV};

/// Factory for the transcription backend
pub struct TranscriberFactory;

impl TranscriberFactory {
    /// Build the transcriber described by `config`.
    ///
    /// Returns `Ok(None)` when no credential is configured. The server still starts in
    /// that case and every upload is answered with a configuration error.
    pub fn create(config: &TranscriptionConfig) -> Result<Option<Arc<dyn Transcriber>>> {
        let Some(api_key) = config.api_key.clone() else {
            warn!("{} is not set; uploads will fail until it is configured", API_KEY_ENV);
            return Ok(None);
        };

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        info!(
            model = %config.model,
            base_url = %config.base_url,
            "Initializing transcription client"
        );

        Ok(Some(Arc::new(OpenAiWhisperClient::new(
            client,
            api_key,
            config.base_url.clone(),
            config.model.clone(),
        ))))
    }
}
