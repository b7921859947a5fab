//! # Slash Command Parsing
//!
//! Decodes the URL-encoded body a chat app posts for a slash command and
//! extracts the `<owner> <repo> <limit>` triple from its `text` field.

use std::borrow::Cow;

use clap::ValueEnum;
use percent_encoding::percent_decode;
use thiserror::Error;

/// Form field carrying the command arguments
pub const TEXT_FIELD: &str = "text";

/// Everything that makes an inbound command unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("missing body")]
  MissingBody,

  #[error("malformed form")]
  MalformedForm,

  #[error("missing text field")]
  MissingText,

  #[error("insufficient arguments")]
  InsufficientArguments,

  #[error("invalid limit '{0}': expected a non-negative integer")]
  InvalidLimit(String),
}

impl ValidationError {
  /// Machine-readable code reported to the caller
  pub const fn code(&self) -> &'static str {
    match self {
      Self::MissingBody => "missing_body",
      Self::MalformedForm => "malformed_form",
      Self::MissingText => "missing_text",
      Self::InsufficientArguments => "insufficient_arguments",
      Self::InvalidLimit(_) => "invalid_limit",
    }
  }

  /// Usage hint for errors the caller can fix by retyping the command
  pub const fn hint(&self) -> Option<&'static str> {
    match self {
      Self::MissingText | Self::InsufficientArguments | Self::InvalidLimit(_) => Some("Usage: <owner> <repo> <limit>"),
      Self::MissingBody | Self::MalformedForm => None,
    }
  }
}

/// How a limit token that is not a non-negative integer is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LimitPolicy {
  /// Treat it as a limit of 0
  #[default]
  Lenient,
  /// Reject the command
  Strict,
}

/// The owner/repo/limit triple extracted from one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
  pub owner: String,
  pub repo_name: String,
  pub limit: u32,
}

impl Command {
  /// Parse a command from a raw form-encoded request body.
  pub fn from_form_body(raw_body: &[u8], policy: LimitPolicy) -> Result<Self, ValidationError> {
    let text = text_field(raw_body)?;
    Self::from_text(&text, policy)
  }

  /// Parse a command from the value of the `text` field.
  ///
  /// Arguments are separated by single spaces, so repeated spaces produce
  /// empty arguments. Anything after the third argument is ignored.
  pub fn from_text(text: &str, policy: LimitPolicy) -> Result<Self, ValidationError> {
    let tokens: Vec<&str> = text.split(' ').collect();
    let [owner, repo_name, limit, ..] = tokens.as_slice() else {
      return Err(ValidationError::InsufficientArguments);
    };

    Ok(Self {
      owner: (*owner).to_string(),
      repo_name: (*repo_name).to_string(),
      limit: parse_limit(limit, policy)?,
    })
  }
}

fn parse_limit(token: &str, policy: LimitPolicy) -> Result<u32, ValidationError> {
  match (token.parse::<u32>(), policy) {
    (Ok(limit), _) => Ok(limit),
    (Err(_), LimitPolicy::Lenient) => Ok(0),
    (Err(_), LimitPolicy::Strict) => Err(ValidationError::InvalidLimit(token.to_string())),
  }
}

/// Decode the body and return the first value of the `text` field.
fn text_field(raw_body: &[u8]) -> Result<String, ValidationError> {
  if raw_body.is_empty() {
    return Err(ValidationError::MissingBody);
  }

  if std::str::from_utf8(raw_body).is_err() || !has_valid_escapes(raw_body) {
    return Err(ValidationError::MalformedForm);
  }

  for pair in raw_body.split(|byte| *byte == b'&').filter(|pair| !pair.is_empty()) {
    let (key, value) = match pair.iter().position(|byte| *byte == b'=') {
      Some(eq) => (&pair[..eq], &pair[eq + 1..]),
      None => (pair, &[][..]),
    };

    if decode_component(key).as_deref() == Ok(TEXT_FIELD) {
      return decode_component(value);
    }
  }

  Err(ValidationError::MissingText)
}

/// Decode one form component: `+` is a space, escapes must form valid UTF-8.
fn decode_component(raw: &[u8]) -> Result<String, ValidationError> {
  let spaced: Cow<'_, [u8]> = if raw.contains(&b'+') {
    Cow::Owned(raw.iter().map(|&byte| if byte == b'+' { b' ' } else { byte }).collect())
  } else {
    Cow::Borrowed(raw)
  };

  match percent_decode(&spaced).decode_utf8() {
    Ok(decoded) => Ok(decoded.into_owned()),
    Err(_invalid_utf8) => Err(ValidationError::MalformedForm),
  }
}

/// Every `%` must introduce two hex digits.
fn has_valid_escapes(raw_body: &[u8]) -> bool {
  let mut bytes = raw_body.iter();
  while let Some(byte) = bytes.next() {
    if *byte == b'%' {
      let escape_is_hex = matches!(
        (bytes.next(), bytes.next()),
        (Some(high), Some(low)) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
      );
      if !escape_is_hex {
        return false;
      }
    }
  }
  true
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(body: &str) -> Result<Command, ValidationError> {
    Command::from_form_body(body.as_bytes(), LimitPolicy::Lenient)
  }

  #[test]
  fn test_parse_slash_command_body() {
    let body = "token=abc&team_id=T1&command=%2Fprs&text=octocat+Hello-World+3&user_name=mona";
    let command = parse(body).unwrap();

    assert_eq!(
      command,
      Command {
        owner: "octocat".to_string(),
        repo_name: "Hello-World".to_string(),
        limit: 3,
      }
    );
  }

  #[test]
  fn test_percent_encoded_spaces() {
    let command = parse("text=octocat%20Hello-World%2010").unwrap();
    assert_eq!(command.repo_name, "Hello-World");
    assert_eq!(command.limit, 10);
  }

  #[test]
  fn test_first_text_value_wins() {
    let command = parse("text=octocat+Spoon-Knife+1&text=github+docs+5").unwrap();
    assert_eq!(command.owner, "octocat");
    assert_eq!(command.repo_name, "Spoon-Knife");
  }

  #[test]
  fn test_extra_arguments_are_ignored() {
    let command = parse("text=octocat+Hello-World+2+please").unwrap();
    assert_eq!(command.limit, 2);
  }

  #[test]
  fn test_empty_body() {
    assert_eq!(parse(""), Err(ValidationError::MissingBody));
  }

  #[test]
  fn test_malformed_escape() {
    assert_eq!(parse("text=octocat%zzHello"), Err(ValidationError::MalformedForm));
    assert_eq!(parse("text=octocat+Hello-World+3%"), Err(ValidationError::MalformedForm));
  }

  #[test]
  fn test_escape_decoding_to_invalid_utf8() {
    assert_eq!(parse("text=%FF%FE+repo+3"), Err(ValidationError::MalformedForm));
  }

  #[test]
  fn test_replacement_character_is_valid_input() {
    let command = parse("text=%EF%BF%BD+repo+3").unwrap();
    assert_eq!(command.owner, "\u{FFFD}");
    assert_eq!(command.limit, 3);

    let command = parse("text=\u{FFFD}+repo+3").unwrap();
    assert_eq!(command.owner, "\u{FFFD}");
  }

  #[test]
  fn test_invalid_escape_in_other_field_is_ignored() {
    let command = parse("user_name=%FF&text=octocat+Hello-World+1").unwrap();
    assert_eq!(command.repo_name, "Hello-World");
  }

  #[test]
  fn test_encoded_field_name() {
    let command = parse("te%78t=octocat+Hello-World+4").unwrap();
    assert_eq!(command.limit, 4);
  }

  #[test]
  fn test_non_utf8_body() {
    let body = [b't', b'e', b'x', b't', b'=', 0xff, b' ', b'r', b' ', b'1'];
    assert_eq!(
      Command::from_form_body(&body, LimitPolicy::Lenient),
      Err(ValidationError::MalformedForm)
    );
  }

  #[test]
  fn test_missing_text_field() {
    assert_eq!(parse("command=%2Fprs&user_name=mona"), Err(ValidationError::MissingText));
  }

  #[test]
  fn test_insufficient_arguments() {
    assert_eq!(parse("text=octocat+Hello-World"), Err(ValidationError::InsufficientArguments));
    assert_eq!(parse("text="), Err(ValidationError::InsufficientArguments));
  }

  #[test]
  fn test_consecutive_spaces_yield_empty_arguments() {
    let command = Command::from_text("octocat  Hello-World", LimitPolicy::Lenient).unwrap();
    assert_eq!(command.owner, "octocat");
    assert_eq!(command.repo_name, "");
    assert_eq!(command.limit, 0);
  }

  #[test]
  fn test_lenient_limit_defaults_to_zero() {
    for token in ["three", "-1", "", "99999999999", "3.5"] {
      let command = Command::from_text(&format!("octocat Hello-World {token}"), LimitPolicy::Lenient).unwrap();
      assert_eq!(command.limit, 0, "token {token:?}");
    }
  }

  #[test]
  fn test_strict_limit_rejects_non_numbers() {
    let result = Command::from_text("octocat Hello-World three", LimitPolicy::Strict);
    assert_eq!(result, Err(ValidationError::InvalidLimit("three".to_string())));

    let command = Command::from_text("octocat Hello-World 7", LimitPolicy::Strict).unwrap();
    assert_eq!(command.limit, 7);
  }

  #[test]
  fn test_error_codes_and_hints() {
    assert_eq!(ValidationError::MissingBody.code(), "missing_body");
    assert_eq!(ValidationError::MissingBody.to_string(), "missing body");
    assert_eq!(ValidationError::MalformedForm.to_string(), "malformed form");
    assert_eq!(ValidationError::InsufficientArguments.to_string(), "insufficient arguments");
    assert!(ValidationError::InsufficientArguments.hint().is_some());
    assert!(ValidationError::MalformedForm.hint().is_none());
  }
}
