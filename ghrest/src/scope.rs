//! # Default Scopes
//!
//! The closed set of scopes a default header or parameter can apply to.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Selects which default table applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
  /// Applied to every request regardless of method
  All,
  Get,
  Post,
  Put,
  Delete,
}

/// Error returned when parsing a scope name that is not recognized
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown scope '{0}': expected one of all, get, post, put, delete")]
pub struct UnknownScope(pub String);

impl Scope {
  /// Every scope, "all" first.
  pub const ALL: [Scope; 5] = [Scope::All, Scope::Get, Scope::Post, Scope::Put, Scope::Delete];

  /// Lowercase name of the scope
  pub const fn as_str(self) -> &'static str {
    match self {
      Scope::All => "all",
      Scope::Get => "get",
      Scope::Post => "post",
      Scope::Put => "put",
      Scope::Delete => "delete",
    }
  }
}

impl fmt::Display for Scope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Scope {
  type Err = UnknownScope;

  /// Parses a scope name case-insensitively. An empty name selects
  /// [`Scope::All`].
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "" | "all" => Ok(Scope::All),
      "get" => Ok(Scope::Get),
      "post" => Ok(Scope::Post),
      "put" => Ok(Scope::Put),
      "delete" => Ok(Scope::Delete),
      _ => Err(UnknownScope(s.to_string())),
    }
  }
}
