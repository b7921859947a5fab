//! GraphQL response payloads shaped like GitHub's answers to the pull request
//! query.

use serde_json::{Value, json};

/// One pull request node in a fixture response
#[derive(Debug, Clone)]
pub struct PullRequestFixture {
  pub number: u32,
  pub title: String,
  pub author: Option<String>,
  pub body_text: String,
}

impl PullRequestFixture {
  /// A pull request in `octocat/Hello-World` authored by `author`
  pub fn new(number: u32, title: &str, author: &str) -> Self {
    Self {
      number,
      title: title.to_string(),
      author: Some(author.to_string()),
      body_text: format!("Body of pull request #{number}"),
    }
  }

  /// A pull request whose author account no longer exists
  pub fn ghost(number: u32, title: &str) -> Self {
    Self {
      author: None,
      ..Self::new(number, title, "ghost")
    }
  }

  /// Web URL GitHub would report for this pull request
  pub fn url(&self) -> String {
    format!("https://github.com/octocat/Hello-World/pull/{}", self.number)
  }

  /// Render the GraphQL node for this pull request
  pub fn to_node(&self) -> Value {
    let author = self.author.as_ref().map(|login| {
      json!({
        "login": login,
        "url": format!("https://github.com/{login}"),
        "avatarUrl": format!("https://avatars.githubusercontent.com/{login}"),
      })
    });

    json!({
      "title": self.title,
      "url": self.url(),
      "bodyText": self.body_text,
      "author": author,
    })
  }
}

/// A successful response for repository `name` holding `pull_requests`
pub fn repository_response(name: &str, pull_requests: &[PullRequestFixture]) -> Value {
  let nodes: Vec<Value> = pull_requests.iter().map(PullRequestFixture::to_node).collect();

  json!({
    "data": {
      "repository": {
        "name": name,
        "pullRequests": { "nodes": nodes }
      }
    }
  })
}

/// The response GitHub sends when `owner/name` does not resolve
pub fn not_found_response(owner: &str, name: &str) -> Value {
  json!({
    "data": { "repository": null },
    "errors": [
      {
        "type": "NOT_FOUND",
        "path": ["repository"],
        "locations": [{ "line": 2, "column": 3 }],
        "message": format!("Could not resolve to a Repository with the name '{owner}/{name}'.")
      }
    ]
  })
}
