//! # prslash Server
//!
//! HTTP service behind a chat slash command: `/prs <owner> <repo> <limit>`
//! answers with the repository's first pull requests rendered as message
//! attachments, fetched from the GitHub GraphQL API.

pub mod cli;
pub mod command;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod server;
pub mod shutdown;
pub mod source;

use std::sync::Arc;

use anyhow::{Context, Result};
use prslash_gh::GitHubClient;
use tokio::net::TcpListener;
use tracing::info;

pub use crate::command::{Command, LimitPolicy, ValidationError};
pub use crate::config::ServerConfig;
pub use crate::envelope::{Attachment, OutputEnvelope};
pub use crate::error::{ErrorBody, HandlerError};
pub use crate::handler::CommandHandler;
pub use crate::server::{build_router, serve};
pub use crate::source::PullRequestSource;

/// Build the command handler described by `config`.
pub fn command_handler(config: &ServerConfig) -> Result<CommandHandler> {
  let client = GitHubClient::with_config(config.auth.clone(), config.github.clone())
    .context("Failed to create GitHub client")?;

  Ok(CommandHandler::new(Arc::new(client), config.limit_policy))
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<()> {
  let handler = command_handler(&config)?;
  let router = build_router(handler);

  let listener = TcpListener::bind(config.bind)
    .await
    .with_context(|| format!("Failed to bind {}", config.bind))?;
  let local_addr = listener.local_addr().context("Failed to read listener address")?;

  info!(
    graphql_url = %config.github.graphql_url,
    limit_policy = ?config.limit_policy,
    "Starting server at {local_addr}"
  );

  serve(listener, router, shutdown::shutdown_signal(), config.graceful_timeout)
    .await
    .context("Server failed")?;

  info!("shutting down");
  Ok(())
}
