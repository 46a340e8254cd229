mod app;
mod config;
mod handlers;
mod models;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Args, ServerConfig};
use crate::handlers::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from(Args::parse());

    if !config.transactions_dir.is_dir() {
        anyhow::bail!(
            "transactions directory '{}' not found",
            config.transactions_dir.display()
        );
    }

    // The chart is written here on every report
    std::fs::create_dir_all(&config.static_dir).with_context(|| {
        format!(
            "failed to create static directory {}",
            config.static_dir.display()
        )
    })?;

    let tera = app::load_templates(&config).context("failed to load templates")?;
    let addr = config.addr;
    let router = app::build_router(Arc::new(AppState::new(config, tera)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
