//! In-memory transport used by unit tests.

use std::sync::Mutex;

use anyhow::Result;
use reqwest::Method;

use crate::defaults::DefaultTable;
use crate::request::RequestOptions;
use crate::transport::Transport;

/// A request captured by [`RecordingTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
  pub method: Method,
  pub path: String,
  pub options: RequestOptions,
}

/// Records every request and answers with a canned body or error.
#[derive(Debug, Default)]
pub struct RecordingTransport {
  requests: Mutex<Vec<RecordedRequest>>,
  failure: Option<String>,
}

impl RecordingTransport {
  /// A transport whose every request fails with `message`
  pub fn failing(message: &str) -> Self {
    Self {
      requests: Mutex::new(Vec::new()),
      failure: Some(message.to_string()),
    }
  }

  pub fn requests(&self) -> Vec<RecordedRequest> {
    self.requests.lock().expect("requests lock poisoned").clone()
  }

  pub fn last_request(&self) -> RecordedRequest {
    self.requests().pop().expect("no request was recorded")
  }
}

impl Transport for RecordingTransport {
  type Response = String;

  async fn request(&self, method: Method, path: &str, options: RequestOptions) -> Result<String> {
    self
      .requests
      .lock()
      .expect("requests lock poisoned")
      .push(RecordedRequest {
        method: method.clone(),
        path: path.to_string(),
        options,
      });

    match &self.failure {
      Some(message) => Err(anyhow::anyhow!("{message}")),
      None => Ok(format!("{method} {path}")),
    }
  }
}

pub fn table(entries: &[(&str, &str)]) -> DefaultTable {
  entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
