//! Command-line interface for the gridrow server.

use clap::{Parser, Subcommand};

/// Gridrow - two-player N-in-a-row lobby server
#[derive(Parser, Debug)]
#[command(name = "gridrow_server")]
#[command(about = "Authoritative lobby server for N-in-a-row games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the WebSocket lobby server
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Play a local game against the computer opponent
    Play {
        /// Board width (3-20)
        #[arg(long, default_value = "3")]
        width: usize,

        /// Board height (3-20)
        #[arg(long, default_value = "3")]
        height: usize,

        /// Computer thinking delay in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,
    },
}
