//! # GitHub Pull Request Endpoints
//!
//! GraphQL query for listing the first pull requests of a repository together
//! with their authors.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::consts::GHOST_LOGIN;
use crate::error::GitHubError;
use crate::graphql::GraphQlOperation;
use crate::models::{PullRequestSummary, RepositoryResult};

/// Version 1 of the pull request listing document
pub const PULL_REQUESTS_QUERY_V1: &str = r#"query PullRequests($owner: String!, $name: String!, $first: Int!) {
  repository(owner: $owner, name: $name) {
    name
    pullRequests(first: $first) {
      nodes {
        title
        url
        bodyText
        author {
          login
          url
          avatarUrl
        }
      }
    }
  }
}
"#;

/// Variables for [`PULL_REQUESTS_QUERY_V1`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestsQuery {
  pub owner: String,
  pub name: String,
  pub first: u32,
}

impl PullRequestsQuery {
  pub fn new(owner: impl Into<String>, name: impl Into<String>, first: u32) -> Self {
    Self {
      owner: owner.into(),
      name: name.into(),
      first,
    }
  }
}

impl GraphQlOperation for PullRequestsQuery {
  const DOCUMENT: &'static str = PULL_REQUESTS_QUERY_V1;
  const OPERATION_NAME: &'static str = "PullRequests";
  type Data = RepositoryData;
}

#[derive(Debug, Deserialize)]
pub struct RepositoryData {
  repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
  name: String,
  #[serde(rename = "pullRequests")]
  pull_requests: PullRequestConnection,
}

#[derive(Debug, Deserialize)]
struct PullRequestConnection {
  #[serde(default)]
  nodes: Vec<Option<PullRequestNode>>,
}

#[derive(Debug, Deserialize)]
struct PullRequestNode {
  title: String,
  url: String,
  #[serde(rename = "bodyText", default)]
  body_text: String,
  author: Option<ActorNode>,
}

#[derive(Debug, Deserialize)]
struct ActorNode {
  login: String,
  url: String,
  #[serde(rename = "avatarUrl")]
  avatar_url: String,
}

impl From<PullRequestNode> for PullRequestSummary {
  fn from(node: PullRequestNode) -> Self {
    let (author_login, author_url, author_avatar_url) = match node.author {
      Some(author) => (author.login, author.url, author.avatar_url),
      None => (GHOST_LOGIN.to_string(), String::new(), String::new()),
    };

    Self {
      title: node.title,
      url: node.url,
      author_login,
      author_url,
      author_avatar_url,
      body_text: node.body_text,
    }
  }
}

impl GitHubClient {
  /// Get the first `limit` pull requests of a repository
  #[instrument(skip(self), level = "debug")]
  pub async fn fetch_pull_requests(&self, owner: &str, repo: &str, limit: u32) -> Result<RepositoryResult, GitHubError> {
    let query = PullRequestsQuery::new(owner, repo, limit);
    let response = self.execute(&query).await?;

    let not_found = || GitHubError::RepositoryNotFound {
      owner: owner.to_string(),
      name: repo.to_string(),
    };

    if response.errors.iter().any(|e| e.is_not_found()) {
      return Err(not_found());
    }

    let repository = response.into_data()?.repository.ok_or_else(not_found)?;

    // Never hand back more than was asked for, whatever the connection holds
    let pull_requests: Vec<PullRequestSummary> = repository
      .pull_requests
      .nodes
      .into_iter()
      .flatten()
      .take(usize::try_from(limit).unwrap_or(usize::MAX))
      .map(PullRequestSummary::from)
      .collect();

    debug!(
      repository = %repository.name,
      count = pull_requests.len(),
      "Fetched pull requests"
    );

    Ok(RepositoryResult {
      name: repository.name,
      pull_requests,
    })
  }
}

#[cfg(test)]
#[path = "tests/pulls_test.rs"]
mod tests;
