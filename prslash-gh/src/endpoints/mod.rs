//! # GitHub API Endpoints
//!
//! Typed GraphQL operations grouped by resource type.

pub mod pulls;
