//! # Handler Errors
//!
//! Tagged failure of a command and its deterministic mapping onto HTTP
//! statuses and a structured JSON error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prslash_gh::GitHubError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::command::ValidationError;

/// Why a command produced no envelope
#[derive(Debug, Error)]
pub enum HandlerError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Upstream(#[from] GitHubError),
}

impl HandlerError {
  /// HTTP status reported to the caller
  pub const fn status(&self) -> StatusCode {
    match self {
      Self::Validation(_) => StatusCode::BAD_REQUEST,
      Self::Upstream(err) if err.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
      Self::Upstream(GitHubError::RepositoryNotFound { .. }) => StatusCode::NOT_FOUND,
      Self::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
  }

  /// Machine-readable error code
  pub const fn code(&self) -> &'static str {
    match self {
      Self::Validation(err) => err.code(),
      Self::Upstream(err) if err.is_timeout() => "upstream_timeout",
      Self::Upstream(GitHubError::RepositoryNotFound { .. }) => "repository_not_found",
      Self::Upstream(_) => "upstream_error",
    }
  }

  fn hint(&self) -> Option<String> {
    match self {
      Self::Validation(err) => err.hint().map(str::to_string),
      Self::Upstream(GitHubError::Unauthorized) => Some("The service's GitHub token was rejected.".to_string()),
      Self::Upstream(_) => None,
    }
  }
}

/// Consistent error shape returned for every failed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
  pub code: String,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub hint: Option<String>,
}

impl From<&HandlerError> for ErrorBody {
  fn from(err: &HandlerError) -> Self {
    Self {
      error: ErrorDetail {
        code: err.code().to_string(),
        message: err.to_string(),
        hint: err.hint(),
      },
    }
  }
}

impl IntoResponse for HandlerError {
  fn into_response(self) -> Response {
    let status = self.status();
    match &self {
      Self::Validation(err) => warn!(code = err.code(), "Rejected command: {err}"),
      Self::Upstream(err) => error!(code = self.code(), "GitHub query failed: {err}"),
    }

    (status, Json(ErrorBody::from(&self))).into_response()
  }
}
