use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for test .netrc files
///
/// Creates a temporary home directory, optionally containing a `.netrc` with
/// the given content. The directory is removed when the guard is dropped. The
/// process `HOME` is left untouched; pass [`NetrcGuard::home_dir`] to the code
/// under test instead.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a new NetrcGuard with the given content
  pub fn new(content: &str) -> Self {
    let guard = Self::empty();
    fs::write(&guard.netrc_path, content).expect("Failed to write test .netrc");
    guard
  }

  /// Create a home directory without any .netrc file
  pub fn empty() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    Self { temp_dir, netrc_path }
  }

  /// Get the path to the .netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the path to the temporary home directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_netrc_guard_writes_content() {
    let guard = NetrcGuard::new("machine github.com login user password token\n");

    assert_eq!(guard.netrc_path(), guard.home_dir().join(".netrc"));
    let content = fs::read_to_string(guard.netrc_path()).unwrap();
    assert!(content.contains("machine github.com"));
  }

  #[test]
  fn test_empty_guard_has_no_netrc() {
    let guard = NetrcGuard::empty();

    assert!(guard.home_dir().exists());
    assert!(!guard.netrc_path().exists());
  }

  #[test]
  fn test_guard_cleans_up() {
    let home = {
      let guard = NetrcGuard::new("");
      guard.home_dir().to_path_buf()
    };

    assert!(!home.exists());
  }
}
