//! Process signal handling for graceful shutdown.

use tracing::{info, warn};

/// Resolve once the process is asked to stop.
///
/// Listens for SIGINT and SIGTERM on Unix and Ctrl+C elsewhere. If no handler
/// can be installed the future never resolves.
pub async fn shutdown_signal() {
  #[cfg(unix)]
  {
    use tokio::signal::unix::{SignalKind, signal};

    match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
      (Ok(mut sigint), Ok(mut sigterm)) => {
        tokio::select! {
          _ = sigint.recv() => info!("Received SIGINT"),
          _ = sigterm.recv() => info!("Received SIGTERM"),
        }
        return;
      }
      (Err(e), _) | (_, Err(e)) => warn!("Failed to install Unix signal handlers, falling back to Ctrl+C: {e}"),
    }
  }

  match tokio::signal::ctrl_c().await {
    Ok(()) => info!("Received Ctrl+C"),
    Err(e) => {
      warn!("Failed to listen for Ctrl+C, shutdown must come from elsewhere: {e}");
      std::future::pending::<()>().await;
    }
  }
}
