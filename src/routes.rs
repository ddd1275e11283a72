use anyhow::Context;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::CorsConfig;
use crate::handlers::upload_audio;
use crate::state::AppState;

pub const SERVICE_STATUS: &str = "Input Master Backend is running!";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Characters of the credential echoed by `/debug`.
const DEBUG_KEY_PREFIX_CHARS: usize = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub api_key_configured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DebugResponse {
    pub openai_key_exists: bool,
    pub openai_key_length: usize,
    pub openai_key_prefix: String,
}

pub fn create_router(state: AppState) -> anyhow::Result<Router> {
    let config = state.config.clone();

    let mut router = Router::new()
        // Health check
        .route("/", get(health_check))
        // Upload, with and without the trailing slash
        .route("/upload-audio/", post(upload_audio))
        .route("/upload-audio", post(upload_audio));

    if config.debug.enabled {
        warn!("/debug is enabled and exposes part of the API key; do not run this in production");
        router = router.route("/debug", get(debug_environment));
    }

    Ok(router
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors)?),
        )
        .with_state(state))
}

/// Fixed origin allow-list, `GET`/`POST` only, credentials allowed.
///
/// Request headers are mirrored rather than wildcarded because browsers reject
/// `Access-Control-Allow-Headers: *` on credentialed requests.
pub fn cors_layer(cors: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: SERVICE_STATUS.to_string(),
        version: SERVICE_VERSION.to_string(),
        api_key_configured: state.api_key_configured(),
    })
}

async fn debug_environment(State(state): State<AppState>) -> Json<DebugResponse> {
    let key = state.config.transcription.api_key.as_deref();
    Json(DebugResponse {
        openai_key_exists: key.is_some(),
        openai_key_length: key.map(|k| k.chars().count()).unwrap_or(0),
        openai_key_prefix: key
            .map(|k| k.chars().take(DEBUG_KEY_PREFIX_CHARS).collect())
            .unwrap_or_else(|| "None".to_string()),
    })
}
