use std::fmt;

/// Represents GitHub authentication credentials
#[derive(Clone)]
pub struct GitHubAuth {
  pub token: String,
}

impl fmt::Debug for GitHubAuth {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GitHubAuth").field("token", &"<redacted>").finish()
  }
}

/// One pull request as reported by the GraphQL API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
  pub title: String,
  pub url: String,
  pub author_login: String,
  pub author_url: String,
  pub author_avatar_url: String,
  pub body_text: String,
}

/// A repository's name together with its pull requests in upstream order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryResult {
  pub name: String,
  pub pull_requests: Vec<PullRequestSummary>,
}
