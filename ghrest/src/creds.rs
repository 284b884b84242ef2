//! # Credential Lookup
//!
//! Read-only helpers for discovering an API token in a `.netrc` file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Credentials for a single `.netrc` machine entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  /// The API token
  pub password: String,
}

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// ```
/// use std::path::Path;
/// use ghrest::creds::get_netrc_path;
///
/// let path = get_netrc_path(Path::new("/home/user"));
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// entries are understood. `Ok(None)` is returned when the machine is missing
/// or its entry lacks a `login` or `password`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
  let reader = BufReader::new(file);

  let mut tokens = Vec::new();
  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    tokens.extend(line.split_whitespace().map(str::to_string));
  }

  let mut current: Option<&str> = None;
  let mut username: Option<&str> = None;
  let mut password: Option<&str> = None;

  let mut iter = tokens.iter().map(String::as_str);
  while let Some(token) = iter.next() {
    match token {
      "machine" | "default" => {
        if current == Some(target_machine) {
          break;
        }
        current = if token == "machine" { iter.next() } else { None };
        username = None;
        password = None;
      }
      "login" => username = iter.next(),
      "password" => password = iter.next(),
      _ => {}
    }
  }

  match (current, username, password) {
    (Some(machine), Some(username), Some(password)) if machine == target_machine => Ok(Some(Credentials {
      username: username.to_string(),
      password: password.to_string(),
    })),
    _ => Ok(None),
  }
}

/// Look up credentials for `machine` in `home`'s `.netrc`, if the file exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn find_credentials(home: &Path, machine: &str) -> Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  if !path.exists() {
    return Ok(None);
  }
  parse_netrc_file(&path, machine)
}

#[cfg(test)]
mod tests {
  use ghrest_test_utils::NetrcGuard;

  use super::*;

  #[test]
  fn test_parse_multi_line_entries() -> Result<()> {
    let guard = NetrcGuard::new(
      r#"machine example.com
  login other
  password other-token

machine github.com
  login testuser
  password gh-token
"#,
    );

    let creds = parse_netrc_file(guard.netrc_path(), "github.com")?;
    assert_eq!(
      creds,
      Some(Credentials {
        username: "testuser".to_string(),
        password: "gh-token".to_string(),
      })
    );
    Ok(())
  }

  #[test]
  fn test_parse_single_line_entry() -> Result<()> {
    let guard = NetrcGuard::new("machine github.com login testuser password gh-token\nmachine example.com login x password y\n");

    let creds = parse_netrc_file(guard.netrc_path(), "github.com")?.expect("credentials");
    assert_eq!(creds.username, "testuser");
    assert_eq!(creds.password, "gh-token");
    Ok(())
  }

  #[test]
  fn test_incomplete_entry_is_none() -> Result<()> {
    let guard = NetrcGuard::new("machine github.com\n  login testuser\n");

    assert_eq!(parse_netrc_file(guard.netrc_path(), "github.com")?, None);
    Ok(())
  }

  #[test]
  fn test_find_credentials_without_netrc() -> Result<()> {
    let guard = NetrcGuard::empty();

    assert_eq!(find_credentials(guard.home_dir(), "github.com")?, None);
    Ok(())
  }

  #[test]
  fn test_find_credentials_missing_machine() -> Result<()> {
    let guard = NetrcGuard::new("machine example.com login x password y\n");

    assert_eq!(find_credentials(guard.home_dir(), "github.com")?, None);
    Ok(())
  }
}
