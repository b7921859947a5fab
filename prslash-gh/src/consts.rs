//! Constants for the prslash-gh client

use std::time::Duration;

/// GraphQL endpoint of the official SaaS GitHub API
pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!("prslash/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for GraphQL requests
pub const ACCEPT: &str = "application/json";

/// Upper bound on a single upstream call unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Login GitHub reports for pull requests whose author account was deleted
pub const GHOST_LOGIN: &str = "ghost";
