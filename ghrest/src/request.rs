//! # Request Options
//!
//! The per-call values handed to a transport, and resolution of request
//! bodies into JSON text.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::consts::EMPTY_JSON_BODY;
use crate::defaults::DefaultTable;

/// Everything a transport needs to issue one request besides method and path.
///
/// Built fresh for every call and consumed by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
  pub query: DefaultTable,
  pub headers: DefaultTable,
  pub body: Option<String>,
  /// Ask the transport for verbose diagnostics
  pub debug: bool,
}

/// Payload for POST and PUT requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
  /// No payload; sent as `{}`
  #[default]
  Empty,
  /// Pre-serialized text, sent verbatim
  Text(String),
  /// Structured data, serialized to JSON text
  Json(Value),
}

impl Body {
  /// Build a structured body from any serializable value.
  ///
  /// # Errors
  ///
  /// Returns an error if `value` cannot be represented as JSON.
  pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
    let value = serde_json::to_value(value).context("Failed to serialize request body")?;
    Ok(Body::Json(value))
  }

  /// Resolve the body into the text placed on the wire.
  ///
  /// Absent, empty and `null` bodies become `{}`.
  ///
  /// # Errors
  ///
  /// Returns an error if a structured body fails to serialize.
  pub fn into_payload(self) -> Result<String> {
    match self {
      Body::Empty | Body::Json(Value::Null) => Ok(EMPTY_JSON_BODY.to_string()),
      Body::Text(text) if text.is_empty() => Ok(EMPTY_JSON_BODY.to_string()),
      Body::Text(text) => Ok(text),
      Body::Json(value) => serde_json::to_string(&value).context("Failed to serialize request body"),
    }
  }
}

impl From<String> for Body {
  fn from(text: String) -> Self {
    Body::Text(text)
  }
}

impl From<&str> for Body {
  fn from(text: &str) -> Self {
    Body::Text(text.to_string())
  }
}

impl From<Value> for Body {
  fn from(value: Value) -> Self {
    Body::Json(value)
  }
}

impl<B: Into<Body>> From<Option<B>> for Body {
  fn from(body: Option<B>) -> Self {
    body.map_or(Body::Empty, Into::into)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[derive(Serialize)]
  struct Label<'a> {
    name: &'a str,
    color: &'a str,
  }

  #[test]
  fn test_empty_body_is_empty_object() -> Result<()> {
    assert_eq!(Body::Empty.into_payload()?, "{}");
    assert_eq!(Body::from(None::<String>).into_payload()?, "{}");
    assert_eq!(Body::from("").into_payload()?, "{}");
    assert_eq!(Body::Json(Value::Null).into_payload()?, "{}");
    Ok(())
  }

  #[test]
  fn test_text_body_is_verbatim() -> Result<()> {
    let raw = "{\"title\":   \"kept as is\"}";
    assert_eq!(Body::from(raw).into_payload()?, raw);
    assert_eq!(Body::from("not json at all").into_payload()?, "not json at all");
    Ok(())
  }

  #[test]
  fn test_json_body_is_serialized() -> Result<()> {
    let body = Body::from(json!({"k": "v"}));
    assert_eq!(body.into_payload()?, "{\"k\":\"v\"}");
    Ok(())
  }

  #[test]
  fn test_body_from_serializable() -> Result<()> {
    let body = Body::json(&Label {
      name: "bug",
      color: "d73a4a",
    })?;
    let payload: Value = serde_json::from_str(&body.into_payload()?)?;
    assert_eq!(payload, json!({"name": "bug", "color": "d73a4a"}));
    Ok(())
  }
}
