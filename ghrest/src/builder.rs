//! # Request Builder
//!
//! The base every resource wrapper builds on. A [`RequestBuilder`] owns the
//! default headers and query parameters for each HTTP method, injects the API
//! token into them once at construction, and merges caller overrides over
//! those defaults before handing the request to a shared [`Transport`].

use std::sync::Arc;

use anyhow::Result;
use reqwest::Method;
use tracing::{debug, instrument};

use crate::consts::{ACCEPT_JSON, ACCESS_TOKEN_PARAM, AUTHORIZATION, CONTENT_TYPE_JSON};
use crate::defaults::{DefaultTable, Defaults, merge, merge_headers};
use crate::request::{Body, RequestOptions};
use crate::scope::Scope;
use crate::transport::{HttpTransport, Transport};

/// Assembles requests from per-method defaults and delegates them to a
/// transport.
///
/// Default tables are fixed once construction (and an optional
/// [`configure`](Self::configure) step) is done, so a builder can be shared
/// across tasks by reference.
pub struct RequestBuilder<T: Transport = HttpTransport> {
  transport: Arc<T>,
  token: String,
  defaults: Defaults,
}

impl<T: Transport> RequestBuilder<T> {
  /// Create a builder that sends requests through `transport` authenticated
  /// with `token`.
  pub fn new(transport: Arc<T>, token: impl Into<String>) -> Self {
    let mut defaults = Defaults::default();
    defaults.headers.insert(Scope::All, "Accept", ACCEPT_JSON);
    defaults
      .headers
      .insert(Scope::Post, "Content-Type", CONTENT_TYPE_JSON)
      .insert(Scope::Put, "Content-Type", CONTENT_TYPE_JSON);

    let mut builder = Self {
      transport,
      token: token.into(),
      defaults,
    };
    builder.inject_token();
    builder
  }

  /// Run a one-time customization over the default tables.
  ///
  /// Resource wrappers use this to add their own defaults. Token entries are
  /// restored afterwards, so `f` cannot replace them.
  pub fn configure(mut self, f: impl FnOnce(&mut Defaults)) -> Self {
    f(&mut self.defaults);
    self.inject_token();
    self
  }

  fn inject_token(&mut self) {
    self
      .defaults
      .parameters
      .insert(Scope::Get, ACCESS_TOKEN_PARAM, self.token.as_str());

    let authorization = format!("token {}", self.token);
    for scope in [Scope::Post, Scope::Put, Scope::Delete] {
      self
        .defaults
        .headers
        .insert(scope, AUTHORIZATION, authorization.as_str());
    }
  }

  /// Token this builder authenticates with
  pub fn token(&self) -> &str {
    &self.token
  }

  /// Transport requests are delegated to
  pub fn transport(&self) -> &Arc<T> {
    &self.transport
  }

  /// Effective default query parameters for `scope`
  pub fn default_parameters_for_type(&self, scope: Scope) -> DefaultTable {
    self.defaults.parameters.resolve(scope)
  }

  /// Effective default headers for `scope`
  pub fn default_headers_for_type(&self, scope: Scope) -> DefaultTable {
    self.defaults.headers.resolve(scope)
  }

  /// Issue a GET to `path`.
  ///
  /// `parameters` and `headers` are merged over the GET defaults, caller
  /// values winning.
  #[instrument(skip(self, parameters, headers, debug), level = "debug")]
  pub async fn get(
    &self,
    path: &str,
    parameters: &DefaultTable,
    headers: &DefaultTable,
    debug: bool,
  ) -> Result<T::Response> {
    let options = RequestOptions {
      query: merge(&self.default_parameters_for_type(Scope::Get), parameters),
      headers: merge_headers(&self.default_headers_for_type(Scope::Get), headers),
      body: None,
      debug,
    };
    self.send(Method::GET, path, options).await
  }

  /// Issue a POST to `path` with `body` resolved to JSON text.
  ///
  /// # Errors
  ///
  /// Returns an error if the body cannot be serialized or the transport
  /// fails.
  #[instrument(skip(self, body, headers, debug), level = "debug")]
  pub async fn post(
    &self,
    path: &str,
    body: impl Into<Body>,
    headers: &DefaultTable,
    debug: bool,
  ) -> Result<T::Response> {
    let options = self.write_options(Scope::Post, body.into(), headers, debug)?;
    self.send(Method::POST, path, options).await
  }

  /// Issue a PUT to `path` with `body` resolved to JSON text.
  ///
  /// # Errors
  ///
  /// Returns an error if the body cannot be serialized or the transport
  /// fails.
  #[instrument(skip(self, body, headers, debug), level = "debug")]
  pub async fn put(
    &self,
    path: &str,
    body: impl Into<Body>,
    headers: &DefaultTable,
    debug: bool,
  ) -> Result<T::Response> {
    let options = self.write_options(Scope::Put, body.into(), headers, debug)?;
    self.send(Method::PUT, path, options).await
  }

  /// Issue a DELETE to `path`. No body is sent.
  #[instrument(skip(self, headers, debug), level = "debug")]
  pub async fn delete(&self, path: &str, headers: &DefaultTable, debug: bool) -> Result<T::Response> {
    let options = RequestOptions {
      query: DefaultTable::new(),
      headers: merge_headers(&self.default_headers_for_type(Scope::Delete), headers),
      body: None,
      debug,
    };
    self.send(Method::DELETE, path, options).await
  }

  fn write_options(&self, scope: Scope, body: Body, headers: &DefaultTable, debug: bool) -> Result<RequestOptions> {
    Ok(RequestOptions {
      query: DefaultTable::new(),
      headers: merge_headers(&self.default_headers_for_type(scope), headers),
      body: Some(body.into_payload()?),
      debug,
    })
  }

  async fn send(&self, method: Method, path: &str, options: RequestOptions) -> Result<T::Response> {
    debug!("Delegating {} {} to transport", method, path);
    self.transport.request(method, path, options).await
  }
}
