// Main entry point for the stock control API server

use anyhow::{Context, Result};
use stock_control::{
    server::{build_app, build_deps},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stock_control=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting stock control API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(backend = ?config.catalog_backend, "Configuration loaded");

    if config.api_keys.is_empty() {
        tracing::warn!("STOCK_CONTROL_API_KEYS is empty; every stock request will be rejected");
    }

    let deps = build_deps(&config).await?;
    let app = build_app(deps, config.api_keys);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
