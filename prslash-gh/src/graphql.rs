//! # GraphQL Envelope
//!
//! Typed request and response envelopes for GitHub's GraphQL endpoint. Each
//! query document is described by a [`GraphQlOperation`], whose value doubles
//! as the variable bindings sent alongside the document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::GitHubError;

/// A GraphQL operation with a fixed document and typed variables.
pub trait GraphQlOperation: Serialize {
  /// Full query document text
  const DOCUMENT: &'static str;
  /// Name of the operation declared in [`Self::DOCUMENT`]
  const OPERATION_NAME: &'static str;
  /// Shape of the `data` member on success
  type Data: DeserializeOwned;
}

/// Request body posted to the GraphQL endpoint
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
  pub query: &'static str,
  #[serde(rename = "operationName")]
  pub operation_name: &'static str,
  pub variables: &'a V,
}

impl<'a, Q: GraphQlOperation> From<&'a Q> for GraphQlRequest<'a, Q> {
  fn from(operation: &'a Q) -> Self {
    Self {
      query: Q::DOCUMENT,
      operation_name: Q::OPERATION_NAME,
      variables: operation,
    }
  }
}

/// Response envelope returned by the GraphQL endpoint
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
  pub data: Option<T>,
  #[serde(default)]
  pub errors: Vec<GraphQlError>,
}

/// A single entry of the `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
  pub message: String,
  #[serde(rename = "type")]
  pub kind: Option<String>,
}

impl GraphQlError {
  /// GitHub tags lookups of missing objects with `NOT_FOUND`.
  pub fn is_not_found(&self) -> bool {
    self.kind.as_deref() == Some("NOT_FOUND")
  }
}

impl<T> GraphQlResponse<T> {
  /// Unwrap the `data` member, failing on any reported error.
  pub fn into_data(self) -> Result<T, GitHubError> {
    if !self.errors.is_empty() {
      return Err(GitHubError::GraphQl {
        messages: self.errors.into_iter().map(|e| e.message).collect(),
      });
    }

    self.data.ok_or_else(|| GitHubError::GraphQl {
      messages: vec!["response carried neither data nor errors".to_string()],
    })
  }
}
