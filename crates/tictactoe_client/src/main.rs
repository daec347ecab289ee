//! Tic-tac-toe terminal client.

use anyhow::Result;
use clap::Parser;
use tictactoe_client::{Cli, ClientConfig, tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Cli::parse().into_config()?;
    init_tracing(&config)?;

    info!(server_url = %config.server_url(), "Starting tic-tac-toe client");
    tui::run_tui(&config).await
}

/// Sends tracing output to the log file; the terminal belongs to the UI.
fn init_tracing(config: &ClientConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
