//! A fake GitHub GraphQL endpoint for tests
//!
//! [`MockGitHub`] wraps a wiremock [`MockServer`] and knows how the pull
//! request query is shaped, so tests only describe what GitHub should answer.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token every mock expects in the `Authorization` header
pub const TEST_TOKEN: &str = "test_token";

/// Path the GraphQL endpoint is served under
const GRAPHQL_PATH: &str = "/graphql";

/// A running fake of the GitHub GraphQL API
pub struct MockGitHub {
  server: MockServer,
}

impl MockGitHub {
  /// Start a new fake GitHub on a random local port
  pub async fn start() -> Self {
    Self {
      server: MockServer::start().await,
    }
  }

  /// URL to configure the client's GraphQL endpoint with
  pub fn graphql_url(&self) -> String {
    format!("{}{GRAPHQL_PATH}", self.server.uri())
  }

  /// Answer the pull request query for `owner/name` with `first` set to
  /// `limit`, expecting exactly `calls` such requests.
  pub async fn expect_pull_requests(&self, owner: &str, name: &str, limit: u32, response: Value, calls: u64) {
    Mock::given(method("POST"))
      .and(path(GRAPHQL_PATH))
      .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
      .and(body_partial_json(json!({
        "variables": { "owner": owner, "name": name, "first": limit }
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(response))
      .expect(calls)
      .mount(&self.server)
      .await;
  }

  /// Answer every GraphQL request with `template`
  pub async fn respond_with(&self, template: ResponseTemplate) {
    Mock::given(method("POST"))
      .and(path(GRAPHQL_PATH))
      .respond_with(template)
      .mount(&self.server)
      .await;
  }

  /// Fail the test on drop if any GraphQL request arrives
  pub async fn expect_no_requests(&self) {
    Mock::given(method("POST"))
      .and(path(GRAPHQL_PATH))
      .respond_with(ResponseTemplate::new(500))
      .expect(0)
      .mount(&self.server)
      .await;
  }

  /// Number of requests the fake has received so far
  pub async fn received_count(&self) -> usize {
    self.server.received_requests().await.map(|requests| requests.len()).unwrap_or_default()
  }

  /// The underlying wiremock server
  pub const fn server(&self) -> &MockServer {
    &self.server
  }
}
