//! # HTTP Transport
//!
//! The outbound contract a request builder delegates to, and its `reqwest`
//! implementation. Connection pooling, TLS and redirects belong to the
//! underlying client.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use thiserror::Error;
use tracing::{debug, info, instrument, trace, warn};

use crate::config::ClientConfig;
use crate::consts::{ACCESS_TOKEN_PARAM, AUTHORIZATION, REDACTED, USER_AGENT};
use crate::defaults::DefaultTable;
use crate::request::RequestOptions;

/// Issues a single HTTP request on behalf of a request builder.
///
/// Implementations must report network failures and non-success statuses as
/// errors so callers can tell them apart from a successful response.
pub trait Transport: Send + Sync {
  /// Value handed back to the caller unmodified
  type Response: Send;

  fn request(
    &self,
    method: Method,
    path: &str,
    options: RequestOptions,
  ) -> impl Future<Output = Result<Self::Response>> + Send;
}

/// Failure categories reported by [`HttpTransport`].
///
/// Returned inside [`anyhow::Error`]; use `downcast_ref::<ApiError>()` to
/// inspect.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Authentication failed (HTTP {status}). Please check your GitHub token.")]
  Unauthorized { status: StatusCode },
  #[error("Resource not found: {url}")]
  NotFound { url: String },
  #[error("Unexpected error: HTTP {status} - {body}")]
  Status { status: StatusCode, body: String },
}

impl ApiError {
  /// HTTP status behind the failure
  pub const fn status(&self) -> StatusCode {
    match self {
      ApiError::Unauthorized { status } | ApiError::Status { status, .. } => *status,
      ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
    }
  }
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) user_agent: String,
}

impl HttpTransport {
  /// Create a transport with a default client for `base_url`
  pub fn new(base_url: &str) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      user_agent: USER_AGENT.to_string(),
    }
  }

  /// Create a transport honoring the configured user agent and timeout.
  ///
  /// # Errors
  ///
  /// Returns an error if the underlying client cannot be built.
  pub fn from_config(config: &ClientConfig) -> Result<Self> {
    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      user_agent: config.user_agent.clone(),
    })
  }

  /// Base URL requests are resolved against
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Resolve a request path against the base URL. Absolute URLs, such as
  /// pagination links, are used as given.
  pub fn url(&self, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
      path.to_string()
    } else if path.starts_with('/') {
      format!("{}{}", self.base_url, path)
    } else {
      format!("{}/{}", self.base_url, path)
    }
  }
}

impl Transport for HttpTransport {
  type Response = reqwest::Response;

  #[instrument(skip(self, options), level = "debug")]
  async fn request(&self, method: Method, path: &str, options: RequestOptions) -> Result<reqwest::Response> {
    let url = self.url(path);
    trace!("GitHub API URL: {}", url);

    if options.debug {
      info!(
        "{} {} query={:?} headers={:?} body={:?}",
        method,
        url,
        redact(&options.query),
        redact(&options.headers),
        options.body
      );
    }

    let mut request = self
      .client
      .request(method.clone(), &url)
      .headers(header_map(&self.user_agent, &options.headers)?);
    if !options.query.is_empty() {
      request = request.query(&options.query);
    }
    if let Some(body) = options.body {
      request = request.body(body);
    }

    let response = request.send().await.with_context(|| format!("{method} {url} failed"))?;

    let status = response.status();
    debug!("GitHub API response status: {}", status);
    if options.debug {
      info!("{} {} -> {} headers={:?}", method, url, status, response.headers());
    }

    if status.is_success() {
      return Ok(response);
    }

    match status {
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        warn!("Authentication failed when accessing GitHub API");
        Err(ApiError::Unauthorized { status }.into())
      }
      StatusCode::NOT_FOUND => Err(ApiError::NotFound { url }.into()),
      _ => {
        let body = response.text().await.unwrap_or_default();
        warn!("Unexpected GitHub API error: HTTP {} - {}", status, body);
        Err(ApiError::Status { status, body }.into())
      }
    }
  }
}

/// Wire headers for a request: the User-Agent, then `headers`.
///
/// Names are case-insensitive on the wire, so a later entry replaces an
/// earlier one instead of being sent alongside it.
fn header_map(user_agent: &str, headers: &DefaultTable) -> Result<HeaderMap> {
  let mut map = HeaderMap::new();
  map.insert(
    header::USER_AGENT,
    HeaderValue::from_str(user_agent).with_context(|| format!("Invalid User-Agent '{user_agent}'"))?,
  );

  for (name, value) in headers {
    let header_name =
      HeaderName::from_bytes(name.as_bytes()).with_context(|| format!("Invalid header name '{name}'"))?;
    let header_value = HeaderValue::from_str(value).with_context(|| format!("Invalid value for header '{name}'"))?;
    map.insert(header_name, header_value);
  }
  Ok(map)
}

/// Copy of `table` with credential values masked for logging
fn redact(table: &DefaultTable) -> DefaultTable {
  table
    .iter()
    .map(|(k, v)| {
      let sensitive = k.eq_ignore_ascii_case(AUTHORIZATION) || k == ACCESS_TOKEN_PARAM;
      (k.clone(), if sensitive { REDACTED.to_string() } else { v.clone() })
    })
    .collect()
}
