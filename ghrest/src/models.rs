use serde::{Deserialize, Serialize};

/// Represents a GitHub user
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
  pub login: String,
  pub id: u64,
  pub name: Option<String>,
  pub html_url: Option<String>,
}

/// Represents a GitHub issue label
#[derive(Debug, Deserialize)]
pub struct GitHubLabel {
  pub name: String,
  pub color: Option<String>,
}

/// Represents a GitHub issue
#[derive(Debug, Deserialize)]
pub struct GitHubIssue {
  pub number: u32,
  pub title: String,
  pub body: Option<String>,
  pub html_url: String,
  pub state: String,
  pub user: GitHubUser,
  #[serde(default)]
  pub labels: Vec<GitHubLabel>,
  #[serde(default)]
  pub locked: bool,
  pub created_at: String,
  pub updated_at: String,
}

/// Parameters for opening an issue
#[derive(Debug, Default, Serialize)]
pub struct CreateIssueParams {
  pub title: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub labels: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub assignees: Vec<String>,
}

/// Reasons accepted when locking an issue conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LockReason {
  #[serde(rename = "off-topic")]
  OffTopic,
  #[serde(rename = "too heated")]
  TooHeated,
  #[serde(rename = "resolved")]
  Resolved,
  #[serde(rename = "spam")]
  Spam,
}
