//! Test utilities shared across the prslash workspace
//!
//! This crate provides common testing infrastructure including:
//! - A wiremock-backed GitHub GraphQL endpoint ([`MockGitHub`])
//! - Builders for GraphQL response payloads ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod fixtures;
pub mod github;

// Re-export commonly used items
pub use fixtures::{PullRequestFixture, not_found_response, repository_response};
pub use github::{MockGitHub, TEST_TOKEN};
