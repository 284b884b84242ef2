//! # GitHub API Endpoints
//!
//! Resource wrappers built on [`RequestBuilder`](crate::builder::RequestBuilder),
//! plus the JSON decoding they share.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub mod issues;
pub mod users;

/// Decode a JSON response body, surfacing the API's `message` field when the
/// body is not the expected shape.
pub(crate) async fn parse_json<R: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<R> {
  let body = response.text().await.context("Failed to read response body")?;

  match serde_json::from_str::<R>(&body) {
    Ok(value) => Ok(value),
    Err(e) => {
      if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&body)
        && let Some(message) = error_json.get("message").and_then(|m| m.as_str())
      {
        return Err(anyhow::anyhow!("Failed to parse {what}: GitHub API error: {message}"));
      }
      Err(anyhow::anyhow!("Failed to parse {what}: {e}"))
    }
  }
}
