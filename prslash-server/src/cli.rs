//! # Command Line Interface
//!
//! Startup arguments for the prslash server.

use std::net::SocketAddr;
use std::time::Duration;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use prslash_gh::consts::GRAPHQL_URL;
use url::Url;

use crate::command::LimitPolicy;

/// Top-level CLI for the prslash server
#[derive(Parser)]
#[command(name = "prslash")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Serve a slash command that lists a GitHub repository's pull requests")]
#[command(
  long_about = "Serves a single slash-command endpoint. POST a form with\n\
        `text=<owner> <repo> <limit>` to `/` and receive the repository's first\n\
        pull requests as chat message attachments."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// GitHub token sent as the bearer credential with every query
  #[arg(value_name = "TOKEN", env = "PRSLASH_GITHUB_TOKEN", hide_env_values = true)]
  pub token: String,

  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show debug level messages\n\
             -vv: Show trace level messages"
  )]
  pub verbose: u8,

  /// How long to wait for in-flight requests on shutdown, e.g. 15s or 1m
  #[arg(long, value_name = "DURATION", default_value = "15s", value_parser = parse_timeout)]
  pub graceful_timeout: Duration,

  /// Address to listen on
  #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:8080")]
  pub bind: SocketAddr,

  /// Timeout for each GitHub query; 0 leaves the HTTP client defaults
  #[arg(long, value_name = "DURATION", default_value = "10s", value_parser = parse_timeout)]
  pub upstream_timeout: Duration,

  /// GitHub GraphQL endpoint
  #[arg(long, value_name = "URL", default_value = GRAPHQL_URL)]
  pub graphql_url: Url,

  /// What to do with a limit that is not a non-negative integer
  #[arg(long, value_enum, ignore_case = true, default_value_t = LimitPolicy::Lenient)]
  pub limit_policy: LimitPolicy,
}

impl Cli {
  /// Tracing level selected by the `-v` count
  pub const fn log_level(&self) -> tracing::Level {
    match self.verbose {
      0 => tracing::Level::INFO,  // Default: startup, requests, warnings and errors
      1 => tracing::Level::DEBUG, // -v: upstream traffic
      _ => tracing::Level::TRACE, // -vv or more: everything
    }
  }
}

/// Parse a human-written duration such as `15s` or `1m30s`; a bare `0`
/// means no timeout.
fn parse_timeout(input: &str) -> Result<Duration, humantime::DurationError> {
  if input.trim() == "0" {
    return Ok(Duration::ZERO);
  }
  humantime::parse_duration(input)
}
