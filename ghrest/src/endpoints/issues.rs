//! GitHub Issues API endpoint implementations.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, instrument, trace};

use crate::builder::RequestBuilder;
use crate::consts::{API_VERSION, API_VERSION_HEADER};
use crate::defaults::DefaultTable;
use crate::endpoints::parse_json;
use crate::models::{CreateIssueParams, GitHubIssue, LockReason};
use crate::request::Body;
use crate::scope::Scope;
use crate::transport::HttpTransport;

/// Wrapper for the `/repos/{owner}/{repo}/issues` resources.
///
/// Pins the REST API version on every request and pages list results at 100
/// items.
pub struct IssuesApi {
  builder: RequestBuilder,
  debug: bool,
}

impl IssuesApi {
  pub fn new(transport: Arc<HttpTransport>, token: &str) -> Self {
    let builder = RequestBuilder::new(transport, token).configure(|defaults| {
      defaults.headers.insert(Scope::All, API_VERSION_HEADER, API_VERSION);
      defaults.parameters.insert(Scope::Get, "per_page", "100");
    });

    Self { builder, debug: false }
  }

  /// Log full requests and responses for every call
  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = debug;
    self
  }

  /// Builder carrying the issue-specific defaults
  pub const fn builder(&self) -> &RequestBuilder {
    &self.builder
  }

  /// Get a specific issue by number.
  ///
  /// # Errors
  ///
  /// Returns an error if the issue is not found, authentication fails,
  /// the request cannot be sent, or the response cannot be parsed.
  #[instrument(skip(self), level = "debug")]
  pub async fn get_issue(&self, owner: &str, repo: &str, issue_number: u32) -> Result<GitHubIssue> {
    info!("Fetching issue #{} for {}/{}", issue_number, owner, repo);

    let path = format!("/repos/{owner}/{repo}/issues/{issue_number}");
    let response = self
      .builder
      .get(&path, &DefaultTable::new(), &DefaultTable::new(), self.debug)
      .await
      .with_context(|| format!("Failed to fetch issue #{issue_number} for {owner}/{repo}"))?;

    let issue: GitHubIssue = parse_json(response, "GitHub issue").await?;
    trace!("Issue: {:?}", issue);
    Ok(issue)
  }

  /// List issues in a repository, `open` ones unless `state` says otherwise
  #[instrument(skip(self), level = "debug")]
  pub async fn list_issues(&self, owner: &str, repo: &str, state: Option<&str>) -> Result<Vec<GitHubIssue>> {
    let path = format!("/repos/{owner}/{repo}/issues");
    let parameters = DefaultTable::from([("state".to_string(), state.unwrap_or("open").to_string())]);

    let response = self
      .builder
      .get(&path, &parameters, &DefaultTable::new(), self.debug)
      .await
      .with_context(|| format!("Failed to list issues for {owner}/{repo}"))?;

    parse_json(response, "GitHub issues").await
  }

  /// Open a new issue
  #[instrument(skip(self, params), level = "debug")]
  pub async fn create_issue(&self, owner: &str, repo: &str, params: &CreateIssueParams) -> Result<GitHubIssue> {
    info!("Creating issue '{}' in {}/{}", params.title, owner, repo);

    let path = format!("/repos/{owner}/{repo}/issues");
    let response = self
      .builder
      .post(&path, Body::json(params)?, &DefaultTable::new(), self.debug)
      .await
      .with_context(|| format!("Failed to create issue in {owner}/{repo}"))?;

    parse_json(response, "created GitHub issue").await
  }

  /// Lock an issue's conversation
  #[instrument(skip(self), level = "debug")]
  pub async fn lock_issue(&self, owner: &str, repo: &str, issue_number: u32, reason: Option<LockReason>) -> Result<()> {
    let path = format!("/repos/{owner}/{repo}/issues/{issue_number}/lock");
    let body = match reason {
      Some(reason) => Body::Json(json!({ "lock_reason": reason })),
      None => Body::Empty,
    };

    self
      .builder
      .put(&path, body, &DefaultTable::new(), self.debug)
      .await
      .with_context(|| format!("Failed to lock issue #{issue_number} for {owner}/{repo}"))?;

    Ok(())
  }

  /// Unlock an issue's conversation
  #[instrument(skip(self), level = "debug")]
  pub async fn unlock_issue(&self, owner: &str, repo: &str, issue_number: u32) -> Result<()> {
    let path = format!("/repos/{owner}/{repo}/issues/{issue_number}/lock");

    self
      .builder
      .delete(&path, &DefaultTable::new(), self.debug)
      .await
      .with_context(|| format!("Failed to unlock issue #{issue_number} for {owner}/{repo}"))?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::transport::ApiError;

  fn mock_issue(number: u32) -> serde_json::Value {
    json!({
      "number": number,
      "title": "Test Issue",
      "body": "This is a test issue",
      "html_url": format!("https://github.com/owner/repo/issues/{number}"),
      "state": "open",
      "user": {
        "login": "test_user",
        "id": 12345,
        "name": "Test User"
      },
      "created_at": "2023-01-01T12:00:00Z",
      "updated_at": "2023-01-01T12:00:00Z",
      "labels": [{"name": "bug", "color": "d73a4a"}],
      "assignees": []
    })
  }

  fn issues_api(mock_server: &MockServer) -> IssuesApi {
    IssuesApi::new(Arc::new(HttpTransport::new(&mock_server.uri())), "test_token")
  }

  #[test]
  fn test_builder_carries_issue_defaults() {
    let issues = IssuesApi::new(Arc::new(HttpTransport::new("https://api.github.com")), "test_token");
    let builder = issues.builder();

    for scope in Scope::ALL {
      assert_eq!(
        builder.default_headers_for_type(scope).get(API_VERSION_HEADER).map(String::as_str),
        Some(API_VERSION),
        "missing API version for {scope}"
      );
    }
    assert_eq!(builder.default_parameters_for_type(Scope::Get)["per_page"], "100");
    assert_eq!(builder.default_parameters_for_type(Scope::Get)["access_token"], "test_token");
    assert_eq!(
      builder.default_headers_for_type(Scope::Delete)["Authorization"],
      "token test_token"
    );
  }

  #[tokio::test]
  async fn test_get_issue_success() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/123"))
      .and(query_param("access_token", "test_token"))
      .and(query_param("per_page", "100"))
      .and(header("accept", "application/json"))
      .and(header("x-github-api-version", API_VERSION))
      .respond_with(ResponseTemplate::new(200).set_body_json(mock_issue(123)))
      .mount(&mock_server)
      .await;

    let issue = issues_api(&mock_server).get_issue("owner", "repo", 123).await?;

    assert_eq!(issue.number, 123);
    assert_eq!(issue.title, "Test Issue");
    assert_eq!(issue.state, "open");
    assert_eq!(issue.labels[0].name, "bug");
    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_not_found() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/404"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&mock_server)
      .await;

    let err = issues_api(&mock_server)
      .get_issue("owner", "repo", 404)
      .await
      .unwrap_err();

    assert!(err.to_string().contains("Failed to fetch issue #404 for owner/repo"));
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::NotFound { .. })));
    Ok(())
  }

  #[tokio::test]
  async fn test_list_issues_with_state() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues"))
      .and(query_param("state", "closed"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([mock_issue(1), mock_issue(2)])))
      .mount(&mock_server)
      .await;

    let issues = issues_api(&mock_server)
      .list_issues("owner", "repo", Some("closed"))
      .await?;

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[1].number, 2);
    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue_posts_json() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues"))
      .and(header("authorization", "token test_token"))
      .and(header("content-type", "application/json"))
      .and(header("x-github-api-version", API_VERSION))
      .and(body_json(json!({"title": "Test Issue", "labels": ["bug"]})))
      .respond_with(ResponseTemplate::new(201).set_body_json(mock_issue(42)))
      .expect(1)
      .mount(&mock_server)
      .await;

    let params = CreateIssueParams {
      title: "Test Issue".to_string(),
      labels: vec!["bug".to_string()],
      ..CreateIssueParams::default()
    };
    let issue = issues_api(&mock_server)
      .create_issue("owner", "repo", &params)
      .await?;

    assert_eq!(issue.number, 42);
    Ok(())
  }

  #[tokio::test]
  async fn test_lock_and_unlock_issue() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
      .and(path("/repos/owner/repo/issues/7/lock"))
      .and(header("authorization", "token test_token"))
      .and(body_string("{\"lock_reason\":\"too heated\"}"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    Mock::given(method("DELETE"))
      .and(path("/repos/owner/repo/issues/7/lock"))
      .and(header("authorization", "token test_token"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issues = issues_api(&mock_server).with_debug(true);
    issues
      .lock_issue("owner", "repo", 7, Some(LockReason::TooHeated))
      .await?;
    issues.unlock_issue("owner", "repo", 7).await?;
    Ok(())
  }

  #[tokio::test]
  async fn test_lock_issue_without_reason_sends_empty_object() -> Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
      .and(path("/repos/owner/repo/issues/8/lock"))
      .and(body_string("{}"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    issues_api(&mock_server)
      .lock_issue("owner", "repo", 8, None)
      .await?;
    Ok(())
  }
}
