use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use input_master_backend::config::Config;
use input_master_backend::routes::create_router;
use input_master_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("input_master_backend=debug,tower_http=debug")),
        )
        .init();

    // Optional file; defaults plus environment are enough to run
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "conf".to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    info!(
        path = %config_path,
        transcription = ?config.transcription,
        origins = ?config.cors.allowed_origins,
        "Loaded configuration"
    );

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host: {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    let app_state = AppState::new(config)?;
    let app = create_router(app_state)?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
