use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `INPUT_MASTER__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "INPUT_MASTER";

/// Environment variable holding the transcription service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub transcription: TranscriptionConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on request bodies. Matches the upstream's own file limit.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: Option<u64>,
}

/// Gates the `/debug` route. Never enable in production: it echoes part of the credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://d4159febd.base44.com".to_string(),
        "https://app--input-master-8d9b0621.base44.app".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "whisper-1".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for TranscriptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl TranscriptionConfig {
    /// Fill the credential from the environment when the file did not set one.
    /// Blank values count as unset either way.
    pub fn resolve_api_key(&mut self, from_env: Option<String>) {
        let configured = self.api_key.take().filter(|k| !k.trim().is_empty());
        self.api_key = configured.or_else(|| from_env.filter(|k| !k.trim().is_empty()));
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Config {
    /// Load configuration from an optional file (`.yaml`, `.json` or `.toml`, extension
    /// may be omitted) layered under `INPUT_MASTER__*` environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config
            .transcription
            .resolve_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }
}
