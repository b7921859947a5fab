//! # prslash Entry Point
//!
//! Parses startup arguments, sets up tracing and serves the slash command
//! endpoint until interrupted.

use anyhow::Result;
use clap::Parser;
use prslash_server::ServerConfig;
use prslash_server::cli::Cli;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // Set up tracing based on verbosity level
  let level = cli.log_level();
  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  prslash_server::run(ServerConfig::from(cli)).await
}
