//! Runtime configuration assembled from the command line.

use std::net::SocketAddr;
use std::time::Duration;

use prslash_gh::{GitHubAuth, GitHubClientConfig};

use crate::cli::Cli;
use crate::command::LimitPolicy;

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub bind: SocketAddr,
  pub graceful_timeout: Duration,
  pub auth: GitHubAuth,
  pub github: GitHubClientConfig,
  pub limit_policy: LimitPolicy,
}

impl From<Cli> for ServerConfig {
  fn from(cli: Cli) -> Self {
    let timeout = (!cli.upstream_timeout.is_zero()).then_some(cli.upstream_timeout);

    Self {
      bind: cli.bind,
      graceful_timeout: cli.graceful_timeout,
      auth: GitHubAuth { token: cli.token },
      github: GitHubClientConfig {
        graphql_url: cli.graphql_url,
        timeout,
      },
      limit_policy: cli.limit_policy,
    }
  }
}
