//! Pulse Functions host
//!
//! Serves the empty-commit and greeting functions over HTTP. An external
//! scheduler calls the empty-commit endpoint on a fixed cadence.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_functions::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pulse_functions=info,pulse_client=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pulse Functions...");

    let config = Config::from_env();
    config.validate()?;

    match config.github_repo.as_deref() {
        Some(repo) => tracing::info!(
            "Configured for repository {} on branch {}",
            repo,
            config.branch
        ),
        None => tracing::warn!("GITHUB_REPO not set; empty-commit invocations will fail"),
    }

    let app = pulse_functions::build_app(&config)?;

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
