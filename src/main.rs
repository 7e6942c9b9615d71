use anyhow::Context;
use tracing_subscriber::EnvFilter;

use track_listings::app::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORT, TRACK_BASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = track_listings::config::config();
    tracing::info!("Starting Track listings API in {:?} mode", config.environment);

    let state = AppState::from_config(config).context("failed to build upstream HTTP client")?;
    let app = router(config, state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Track PMS API running on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
