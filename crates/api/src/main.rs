//! Drawing Emotion Service - Main Entry Point

use anyhow::Context;
use api::{init_logging, install_metrics, run_server, AppState, ServiceConfig};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load().context("loading configuration")?;
    init_logging(&config.log_level, config.log_format)?;

    info!("=== Drawing Emotion Service v{} ===", env!("CARGO_PKG_VERSION"));

    let metrics = install_metrics()?;
    let state = AppState::from_config(&config)
        .context("initializing classifier")?
        .with_metrics(metrics);

    run_server(&config.bind_addr, Arc::new(state)).await?;

    Ok(())
}
