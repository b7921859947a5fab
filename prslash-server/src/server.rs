//! # HTTP Server
//!
//! axum router for the slash command endpoint and a serve loop whose graceful
//! shutdown is bounded by a drain timeout.

use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::envelope::OutputEnvelope;
use crate::error::HandlerError;
use crate::handler::CommandHandler;

/// Build the router serving `POST /` and `GET /healthz`.
pub fn build_router(handler: CommandHandler) -> Router {
  Router::new()
    .route("/", post(command))
    .route("/healthz", get(healthz))
    .with_state(Arc::new(handler))
}

async fn command(
  State(handler): State<Arc<CommandHandler>>,
  body: Bytes,
) -> Result<Json<OutputEnvelope>, HandlerError> {
  handler.handle(&body).await.map(Json)
}

async fn healthz() -> &'static str {
  "ok"
}

/// Serve `router` until `shutdown` resolves.
///
/// Once shutdown starts no new connections are accepted and in-flight requests
/// get `grace` to finish before the server stops waiting for them.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F, grace: Duration) -> io::Result<()>
where
  F: Future<Output = ()> + Send + 'static,
{
  let (draining_tx, draining_rx) = oneshot::channel::<()>();
  let graceful = async move {
    shutdown.await;
    info!("Shutting down, waiting up to {grace:?} for in-flight requests");
    let _ = draining_tx.send(());
  };

  let server = axum::serve(listener, router).with_graceful_shutdown(graceful).into_future();
  tokio::pin!(server);

  tokio::select! {
    result = &mut server => return result,
    Ok(()) = draining_rx => {}
  }

  match tokio::time::timeout(grace, server).await {
    Ok(result) => result,
    Err(_) => {
      warn!("In-flight requests did not finish within {grace:?}, exiting anyway");
      Ok(())
    }
  }
}

#[cfg(test)]
mod tests {
  use axum::body::{Body, to_bytes};
  use axum::http::{Request, StatusCode, header};
  use prslash_gh::{GitHubError, RepositoryResult};
  use tower::ServiceExt;

  use super::*;
  use crate::command::LimitPolicy;
  use crate::source::PullRequestSource;

  struct EmptyRepository;

  #[async_trait::async_trait]
  impl PullRequestSource for EmptyRepository {
    async fn fetch_pull_requests(&self, _owner: &str, repo: &str, _limit: u32) -> Result<RepositoryResult, GitHubError> {
      Ok(RepositoryResult {
        name: repo.to_string(),
        pull_requests: Vec::new(),
      })
    }
  }

  fn router() -> Router {
    build_router(CommandHandler::new(Arc::new(EmptyRepository), LimitPolicy::Lenient))
  }

  #[tokio::test]
  async fn test_post_root_returns_json() -> anyhow::Result<()> {
    let request = Request::post("/")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from("text=octocat+Hello-World+3"))?;

    let response = router().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let envelope: OutputEnvelope = serde_json::from_slice(&bytes)?;
    assert_eq!(envelope.text, "*Repo Name* : Hello-World");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_root_is_not_allowed() -> anyhow::Result<()> {
    let response = router().oneshot(Request::get("/").body(Body::empty())?).await?;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
  }

  #[tokio::test]
  async fn test_healthz() -> anyhow::Result<()> {
    let response = router().oneshot(Request::get("/healthz").body(Body::empty())?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
  }

  #[tokio::test]
  async fn test_serve_stops_on_shutdown() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let shutdown = async move {
      let _ = stop_rx.await;
    };

    let handle = tokio::spawn(serve(listener, router(), shutdown, Duration::from_secs(1)));
    stop_tx.send(()).ok();

    let result = tokio::time::timeout(Duration::from_secs(5), handle).await??;
    assert!(result.is_ok());

    Ok(())
  }
}
