//! # Command Handler
//!
//! Turns one raw slash command body into a chat envelope: parse, query GitHub
//! once, reshape.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::command::{Command, LimitPolicy};
use crate::envelope::OutputEnvelope;
use crate::error::HandlerError;
use crate::source::PullRequestSource;

/// Handles slash commands against a shared pull request source
#[derive(Clone)]
pub struct CommandHandler {
  source: Arc<dyn PullRequestSource>,
  limit_policy: LimitPolicy,
}

impl CommandHandler {
  pub fn new(source: Arc<dyn PullRequestSource>, limit_policy: LimitPolicy) -> Self {
    Self { source, limit_policy }
  }

  /// Handle a raw form-encoded request body.
  ///
  /// Validation failures never reach GitHub.
  #[instrument(skip_all, fields(body_len = raw_body.len()))]
  pub async fn handle(&self, raw_body: &[u8]) -> Result<OutputEnvelope, HandlerError> {
    let command = Command::from_form_body(raw_body, self.limit_policy)?;
    info!(
      owner = %command.owner,
      repo = %command.repo_name,
      limit = command.limit,
      "Listing pull requests"
    );

    let repository = self
      .source
      .fetch_pull_requests(&command.owner, &command.repo_name, command.limit)
      .await?;

    Ok(OutputEnvelope::from(repository))
  }
}
