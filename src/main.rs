use anyhow::{Context, Result};
use portfolio_site::{config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_site=info".parse()?),
        )
        .init();

    info!("Starting portfolio site");

    // Load configuration from environment
    let config = config::Config::from_env()?;
    let addr = format!("0.0.0.0:{}", config.port);
    info!("Base URL: {} ({:?})", config.base_url, config.environment);

    // Build the content index once
    let state = server::AppState::load(config).context("Failed to index content")?;
    info!("Loaded {} content items", state.articles.index().len());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on http://{}", addr);

    axum::serve(listener, server::app(state)).await?;
    Ok(())
}
