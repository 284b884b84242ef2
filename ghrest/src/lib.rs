//! # GitHub REST Client
//!
//! A thin client for a Git-hosting REST API. [`RequestBuilder`] holds the
//! per-method default headers and query parameters, injects the API token
//! into them, and hands each request to a shared [`Transport`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ghrest::{DefaultTable, HttpTransport, RequestBuilder};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let transport = Arc::new(HttpTransport::new("https://api.github.com"));
//! let builder = RequestBuilder::new(transport, "my-token");
//!
//! let response = builder
//!   .get("/user", &DefaultTable::new(), &DefaultTable::new(), false)
//!   .await?;
//! println!("{}", response.text().await?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod consts;
pub mod creds;
pub mod defaults;
pub mod endpoints;
pub mod models;
pub mod request;
pub mod scope;
pub mod transport;

#[cfg(test)]
mod testing;

pub use builder::RequestBuilder;
pub use config::{ClientConfig, ConfigDirs};
pub use defaults::{DefaultTable, DefaultTables, Defaults};
pub use endpoints::issues::IssuesApi;
pub use endpoints::users::UsersApi;
pub use models::{CreateIssueParams, GitHubIssue, GitHubLabel, GitHubUser, LockReason};
pub use request::{Body, RequestOptions};
pub use scope::{Scope, UnknownScope};
pub use transport::{ApiError, HttpTransport, Transport};
