use std::sync::Arc;

use crate::asr::{Transcriber, TranscriberFactory};
use crate::config::Config;

/// Shared, read-only request context. Cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no credential is configured.
    pub transcriber: Option<Arc<dyn Transcriber>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let transcriber = TranscriberFactory::create(&config.transcription)?;
        Ok(Self::with_transcriber(config, transcriber))
    }

    /// Build state around an existing transcriber instead of the configured one.
    pub fn with_transcriber(config: Config, transcriber: Option<Arc<dyn Transcriber>>) -> Self {
        Self {
            config: Arc::new(config),
            transcriber,
        }
    }

    pub fn api_key_configured(&self) -> bool {
        self.transcriber.is_some()
    }
}
