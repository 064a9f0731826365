//! Gridrow server - unified CLI
//!
//! Serve mode runs the WebSocket lobby server; play mode runs a local
//! game against the computer opponent.

#![warn(missing_docs)]

mod cli;
mod solo;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host } => {
            info!("Starting gridrow lobby server");
            gridrow_server::serve(host, port).await
        }
        Command::Play {
            width,
            height,
            delay_ms,
        } => solo::run(width, height, Duration::from_millis(delay_ms)).await,
    }
}
