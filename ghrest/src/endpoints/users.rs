use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::instrument;

use crate::builder::RequestBuilder;
use crate::defaults::DefaultTable;
use crate::endpoints::parse_json;
use crate::models::GitHubUser;
use crate::transport::HttpTransport;

/// Wrapper for the `/user` and `/users` resources
pub struct UsersApi {
  builder: RequestBuilder,
}

impl UsersApi {
  pub fn new(transport: Arc<HttpTransport>, token: &str) -> Self {
    Self {
      builder: RequestBuilder::new(transport, token),
    }
  }

  /// Get the current authenticated user
  #[instrument(skip(self), level = "debug")]
  pub async fn get_current_user(&self) -> Result<GitHubUser> {
    let response = self
      .builder
      .get("/user", &DefaultTable::new(), &DefaultTable::new(), false)
      .await
      .context("Failed to fetch GitHub user")?;

    parse_json(response, "GitHub user").await
  }

  /// Get a user by login
  #[instrument(skip(self), level = "debug")]
  pub async fn get_user(&self, login: &str) -> Result<GitHubUser> {
    let response = self
      .builder
      .get(&format!("/users/{login}"), &DefaultTable::new(), &DefaultTable::new(), false)
      .await
      .with_context(|| format!("Failed to fetch GitHub user {login}"))?;

    parse_json(response, "GitHub user").await
  }
}
