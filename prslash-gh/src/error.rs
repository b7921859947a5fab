//! Error taxonomy for calls against the GitHub GraphQL API.

use reqwest::StatusCode;
use thiserror::Error;

/// Anything that can go wrong between sending a query and holding a decoded
/// result.
#[derive(Debug, Error)]
pub enum GitHubError {
  #[error("Failed to reach GitHub: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("GitHub did not answer in time: {0}")]
  Timeout(#[source] reqwest::Error),

  #[error("Authentication failed. Please check your GitHub credentials.")]
  Unauthorized,

  /// `body` is kept for logging and never rendered in the message
  #[error("Unexpected error: HTTP {status}")]
  Status { status: StatusCode, body: String },

  #[error("GitHub GraphQL API error: {}", .messages.join("; "))]
  GraphQl { messages: Vec<String> },

  #[error("Repository {owner}/{name} not found")]
  RepositoryNotFound { owner: String, name: String },

  #[error("Failed to parse GitHub response: {0}")]
  Decode(#[source] serde_json::Error),
}

impl GitHubError {
  /// Classify a transport-level failure.
  pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      Self::Timeout(err)
    } else {
      Self::Transport(err)
    }
  }

  /// True when the upstream call ran out of time.
  pub const fn is_timeout(&self) -> bool {
    matches!(self, Self::Timeout(_))
  }
}
