//! # Configuration Management
//!
//! Client settings loaded from a TOML file in the platform configuration
//! directory, with environment overrides and token discovery.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::consts::{API_BASE_URL, ENV_API_URL, ENV_GITHUB_TOKEN, ENV_TOKEN, USER_AGENT};
use crate::creds::find_credentials;

/// Configuration directories for ghrest
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "ghrest").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit directory instead of the platform default
  pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  /// Get the path to the client configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load the client configuration, or defaults when the file is absent
  pub fn load_config(&self) -> Result<ClientConfig> {
    ClientConfig::load_from(&self.config_path())
  }

  /// Save the client configuration, creating the directory if needed
  pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
    fs::create_dir_all(&self.config_dir)
      .with_context(|| format!("Failed to create config directory {}", self.config_dir.display()))?;

    let content = toml::to_string_pretty(config).context("Failed to serialize client config")?;
    let path = self.config_path();
    fs::write(&path, content).with_context(|| format!("Failed to write client config to {}", path.display()))?;

    Ok(())
  }
}

/// Settings for building a transport and authenticating requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
  pub base_url: String,
  pub user_agent: String,
  /// Whole-request timeout applied by the transport
  pub timeout_secs: Option<u64>,
  pub token: Option<String>,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: API_BASE_URL.to_string(),
      user_agent: USER_AGENT.to_string(),
      timeout_secs: None,
      token: None,
    }
  }
}

impl ClientConfig {
  /// Load configuration from `path`, returning defaults when it does not exist
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      debug!("No client config at {}, using defaults", path.display());
      return Ok(Self::default());
    }

    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read client config from {}", path.display()))?;
    let config: ClientConfig =
      toml::from_str(&content).with_context(|| format!("Failed to parse client config from {}", path.display()))?;

    Ok(config)
  }

  /// Apply overrides read through `env` (typically [`std::env::var`]).
  pub fn with_env_overrides(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
    if let Some(base_url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
      debug!("Using API base URL from ${}", ENV_API_URL);
      self.base_url = base_url;
    }
    self
  }

  /// `.netrc` machine name for the configured API host.
  ///
  /// A leading `api.` is dropped so `api.github.com` maps to `github.com`.
  pub fn netrc_machine(&self) -> Result<String> {
    let url = Url::parse(&self.base_url).with_context(|| format!("Invalid API base URL: {}", self.base_url))?;
    let host = url
      .host_str()
      .with_context(|| format!("API base URL has no host: {}", self.base_url))?;

    Ok(host.strip_prefix("api.").unwrap_or(host).to_string())
  }

  /// Find the API token.
  ///
  /// Sources in order: `explicit`, `$GHREST_TOKEN`, `$GITHUB_TOKEN`, the
  /// config file, then the `.netrc` entry for [`Self::netrc_machine`] under
  /// `home`.
  ///
  /// # Errors
  ///
  /// Returns an error if no source yields a token, or if `.netrc` exists but
  /// cannot be read.
  pub fn resolve_token(
    &self,
    explicit: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    home: Option<&Path>,
  ) -> Result<String> {
    let non_empty = |v: &String| !v.trim().is_empty();

    if let Some(token) = explicit.map(str::to_string).filter(non_empty) {
      return Ok(token);
    }
    for var in [ENV_TOKEN, ENV_GITHUB_TOKEN] {
      if let Some(token) = env(var).filter(non_empty) {
        debug!("Using token from ${}", var);
        return Ok(token);
      }
    }
    if let Some(token) = self.token.clone().filter(non_empty) {
      debug!("Using token from config file");
      return Ok(token);
    }

    let machine = self.netrc_machine()?;
    if let Some(home) = home
      && let Some(creds) = find_credentials(home, &machine)?
    {
      debug!("Using token from .netrc entry for {}", machine);
      return Ok(creds.password);
    }

    Err(anyhow::anyhow!(
      "No GitHub token found. Set ${ENV_TOKEN} or ${ENV_GITHUB_TOKEN}, add `token` to the config file, or add a .netrc entry for machine '{machine}'."
    ))
  }

  /// [`Self::resolve_token`] against the process environment and home directory
  pub fn resolve_token_from_env(&self, explicit: Option<&str>) -> Result<String> {
    let base_dirs = BaseDirs::new();
    let home = base_dirs.as_ref().map(BaseDirs::home_dir);
    self.resolve_token(explicit, |var| std::env::var(var).ok(), home)
  }
}
