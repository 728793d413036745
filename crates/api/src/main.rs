//! Credit Risk Scoring Server - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Credit Risk Scoring v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Loading {:?} model from {}",
        config.artifacts.format,
        config.artifacts.model.display()
    );

    run_server(config).await
}
