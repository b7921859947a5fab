//! # GitHub GraphQL Client
//!
//! Provides GitHub GraphQL API integration for listing a repository's pull
//! requests, with bearer authentication, typed query documents and a typed
//! error taxonomy for upstream failures.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod graphql;
pub mod models;

// Re-export the client
pub use client::{GitHubClient, GitHubClientConfig, create_github_client};
// Re-export the query builder
pub use endpoints::pulls::{PULL_REQUESTS_QUERY_V1, PullRequestsQuery};
pub use error::GitHubError;
// Re-export models
pub use models::{GitHubAuth, PullRequestSummary, RepositoryResult};
