//! # GitHub HTTP Client
//!
//! HTTP client implementation for the GitHub GraphQL API, handling bearer
//! authentication, request building, and response envelope parsing.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::consts::{ACCEPT, DEFAULT_TIMEOUT, GRAPHQL_URL, USER_AGENT};
use crate::error::GitHubError;
use crate::graphql::{GraphQlOperation, GraphQlRequest, GraphQlResponse};
use crate::models::GitHubAuth;

/// Transport settings for a [`GitHubClient`]
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
  /// GraphQL endpoint; differs from the default on GitHub Enterprise
  pub graphql_url: Url,
  /// Per-request timeout, `None` leaves reqwest's defaults in place
  pub timeout: Option<Duration>,
}

impl Default for GitHubClientConfig {
  fn default() -> Self {
    Self {
      graphql_url: default_graphql_url(),
      timeout: Some(DEFAULT_TIMEOUT),
    }
  }
}

static DEFAULT_GRAPHQL_URL: LazyLock<Url> =
  LazyLock::new(|| Url::parse(GRAPHQL_URL).expect("Failed to parse GitHub GraphQL URL"));

/// The public GitHub GraphQL endpoint
pub fn default_graphql_url() -> Url {
  DEFAULT_GRAPHQL_URL.clone()
}

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) graphql_url: Url,
  pub(crate) auth: GitHubAuth,
}

impl GitHubClient {
  /// Create a new GitHub client against the public endpoint
  pub fn new(auth: GitHubAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      graphql_url: default_graphql_url(),
      auth,
    }
  }

  /// Create a client with explicit transport settings
  pub fn with_config(auth: GitHubAuth, config: GitHubClientConfig) -> Result<Self, GitHubError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(GitHubError::Transport)?;

    Ok(Self {
      client,
      graphql_url: config.graphql_url,
      auth,
    })
  }

  /// The endpoint queries are posted to
  pub const fn graphql_url(&self) -> &Url {
    &self.graphql_url
  }

  /// Post a GraphQL operation and decode the response envelope.
  ///
  /// HTTP-level failures are mapped to [`GitHubError`]; GraphQL-level errors
  /// are left in the returned envelope for the caller to interpret.
  #[instrument(skip(self, operation), fields(operation = Q::OPERATION_NAME), level = "debug")]
  pub async fn execute<Q: GraphQlOperation>(&self, operation: &Q) -> Result<GraphQlResponse<Q::Data>, GitHubError> {
    let request = GraphQlRequest::from(operation);

    let response = self
      .client
      .post(self.graphql_url.clone())
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT)
      .bearer_auth(&self.auth.token)
      .json(&request)
      .send()
      .await
      .map_err(GitHubError::from_reqwest)?;

    debug!(status = %response.status(), "GraphQL response received");

    match response.status() {
      status if status.is_success() => {
        // First get the response body as text
        let body = response.text().await.map_err(GitHubError::from_reqwest)?;

        // Then try to parse it as a GraphQL envelope
        serde_json::from_str::<GraphQlResponse<Q::Data>>(&body).map_err(GitHubError::Decode)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GitHubError::Unauthorized),
      status => {
        let body = response.text().await.unwrap_or_default();
        warn!(%status, %body, "Unexpected GitHub response");
        Err(GitHubError::Status { status, body })
      }
    }
  }
}

/// Create a GitHub client from a bearer token
pub fn create_github_client(token: &str) -> GitHubClient {
  let auth = GitHubAuth {
    token: token.to_string(),
  };

  GitHubClient::new(auth)
}

#[cfg(test)]
mod tests {
  use serde::Serialize;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  #[derive(Serialize)]
  struct Viewer;

  impl GraphQlOperation for Viewer {
    const DOCUMENT: &'static str = "query Viewer { viewer { login } }";
    const OPERATION_NAME: &'static str = "Viewer";
    type Data = serde_json::Value;
  }

  fn client_for(mock_server: &MockServer) -> anyhow::Result<GitHubClient> {
    let mut client = create_github_client("test_token");
    client.graphql_url = Url::parse(&format!("{}/graphql", mock_server.uri()))?;
    Ok(client)
  }

  /// Test that GitHub client can be created with a token
  #[tokio::test]
  async fn test_github_client_creation() -> anyhow::Result<()> {
    let client = create_github_client("test_token");

    assert_eq!(client.graphql_url.as_str(), "https://api.github.com/graphql");
    assert_eq!(client.auth.token, "test_token");

    Ok(())
  }

  #[test]
  fn test_github_client_with_config() -> anyhow::Result<()> {
    let config = GitHubClientConfig {
      graphql_url: Url::parse("https://github.example.com/api/graphql")?,
      timeout: None,
    };
    let client = GitHubClient::with_config(
      GitHubAuth {
        token: "test_token".to_string(),
      },
      config,
    )?;

    assert_eq!(client.graphql_url().as_str(), "https://github.example.com/api/graphql");
    Ok(())
  }

  /// Test that the bearer token is sent with every query
  #[tokio::test]
  async fn test_execute_sends_bearer_token() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server)?;

    Mock::given(method("POST"))
      .and(path("/graphql"))
      .and(header("Authorization", "Bearer test_token"))
      .and(header("Accept", "application/json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "data": { "viewer": { "login": "octocat" } }
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let response = client.execute(&Viewer).await?;
    let data = response.into_data()?;
    assert_eq!(data["viewer"]["login"], "octocat");

    Ok(())
  }

  #[tokio::test]
  async fn test_execute_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server)?;

    Mock::given(method("POST"))
      .and(path("/graphql"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
          "message": "Bad credentials",
          "documentation_url": "https://docs.github.com/graphql"
      })))
      .mount(&mock_server)
      .await;

    let result = client.execute(&Viewer).await;
    assert!(matches!(result, Err(GitHubError::Unauthorized)));

    Ok(())
  }

  #[tokio::test]
  async fn test_execute_unexpected_status() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server)?;

    Mock::given(method("POST"))
      .and(path("/graphql"))
      .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
      .mount(&mock_server)
      .await;

    match client.execute(&Viewer).await {
      Err(GitHubError::Status { status, body }) => {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "boom");
      }
      other => panic!("expected status error, got {other:?}"),
    }

    Ok(())
  }

  #[tokio::test]
  async fn test_execute_invalid_json() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server)?;

    Mock::given(method("POST"))
      .and(path("/graphql"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
      .mount(&mock_server)
      .await;

    let result = client.execute(&Viewer).await;
    assert!(matches!(result, Err(GitHubError::Decode(_))));

    Ok(())
  }

  #[tokio::test]
  async fn test_execute_times_out() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let config = GitHubClientConfig {
      graphql_url: Url::parse(&format!("{}/graphql", mock_server.uri()))?,
      timeout: Some(Duration::from_millis(100)),
    };
    let client = GitHubClient::with_config(
      GitHubAuth {
        token: "test_token".to_string(),
      },
      config,
    )?;

    Mock::given(method("POST"))
      .and(path("/graphql"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_delay(Duration::from_secs(2))
          .set_body_json(serde_json::json!({ "data": {} })),
      )
      .mount(&mock_server)
      .await;

    let result = client.execute(&Viewer).await;
    assert!(result.as_ref().is_err_and(GitHubError::is_timeout), "got {result:?}");

    Ok(())
  }
}
