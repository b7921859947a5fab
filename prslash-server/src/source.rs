//! Seam between the command handler and the GitHub API.

use async_trait::async_trait;
use prslash_gh::{GitHubClient, GitHubError, RepositoryResult};

/// Anything that can list a repository's pull requests
#[async_trait]
pub trait PullRequestSource: Send + Sync {
  async fn fetch_pull_requests(&self, owner: &str, repo: &str, limit: u32) -> Result<RepositoryResult, GitHubError>;
}

#[async_trait]
impl PullRequestSource for GitHubClient {
  async fn fetch_pull_requests(&self, owner: &str, repo: &str, limit: u32) -> Result<RepositoryResult, GitHubError> {
    GitHubClient::fetch_pull_requests(self, owner, repo, limit).await
  }
}
