//! # Chat Message Envelope
//!
//! JSON payload returned to the chat app: a headline naming the repository and
//! one attachment per pull request.

use prslash_gh::{PullRequestSummary, RepositoryResult};
use serde::{Deserialize, Serialize};

/// Prefix of the envelope's headline
pub const REPO_NAME_LABEL: &str = "*Repo Name* : ";

/// Response body for a successful command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEnvelope {
  pub text: String,
  pub attachments: Vec<Attachment>,
}

/// Rich content block describing one pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
  pub author_name: String,
  pub author_link: String,
  pub author_icon: String,
  pub title: String,
  pub title_link: String,
  pub text: String,
}

impl From<PullRequestSummary> for Attachment {
  fn from(pr: PullRequestSummary) -> Self {
    Self {
      author_name: pr.author_login,
      author_link: pr.author_url,
      author_icon: pr.author_avatar_url,
      title: pr.title,
      title_link: pr.url,
      text: pr.body_text,
    }
  }
}

impl From<RepositoryResult> for OutputEnvelope {
  fn from(repository: RepositoryResult) -> Self {
    Self {
      text: format!("{REPO_NAME_LABEL}{}", repository.name),
      attachments: repository.pull_requests.into_iter().map(Attachment::from).collect(),
    }
  }
}
