//! Configuration directory management for testing

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary configuration directory, removed when dropped
pub struct ConfigDirGuard {
  temp_dir: TempDir,
}

impl Default for ConfigDirGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl ConfigDirGuard {
  /// Create an empty configuration directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    Self { temp_dir }
  }

  /// Create a configuration directory holding `config.toml` with `content`
  pub fn with_config(content: &str) -> Self {
    let guard = Self::new();
    fs::write(guard.config_path(), content).expect("Failed to write test config");
    guard
  }

  /// Get the path to the configuration directory
  pub fn config_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.temp_dir.path().join("config.toml")
  }
}
