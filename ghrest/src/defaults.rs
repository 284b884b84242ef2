//! # Default Tables
//!
//! Per-scope tables of default headers and query parameters, and the merge
//! rules used to resolve them for a request.

use std::collections::BTreeMap;

use crate::scope::Scope;

/// Mapping of header or parameter names to values.
pub type DefaultTable = BTreeMap<String, String>;

/// One [`DefaultTable`] per [`Scope`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultTables {
  all: DefaultTable,
  get: DefaultTable,
  post: DefaultTable,
  put: DefaultTable,
  delete: DefaultTable,
}

impl DefaultTables {
  /// Create an empty set of tables
  pub fn new() -> Self {
    Self::default()
  }

  /// The table stored for `scope`, without merging "all"
  pub const fn table(&self, scope: Scope) -> &DefaultTable {
    match scope {
      Scope::All => &self.all,
      Scope::Get => &self.get,
      Scope::Post => &self.post,
      Scope::Put => &self.put,
      Scope::Delete => &self.delete,
    }
  }

  /// Mutable access to the table stored for `scope`
  pub const fn table_mut(&mut self, scope: Scope) -> &mut DefaultTable {
    match scope {
      Scope::All => &mut self.all,
      Scope::Get => &mut self.get,
      Scope::Post => &mut self.post,
      Scope::Put => &mut self.put,
      Scope::Delete => &mut self.delete,
    }
  }

  /// Set a single entry in the table for `scope`
  pub fn insert(&mut self, scope: Scope, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.table_mut(scope).insert(key.into(), value.into());
    self
  }

  /// Effective defaults for `scope`.
  ///
  /// [`Scope::All`] yields the "all" table verbatim. Any other scope yields
  /// the "all" table overlaid with the scope's own entries.
  pub fn resolve(&self, scope: Scope) -> DefaultTable {
    match scope {
      Scope::All => self.all.clone(),
      _ => merge(&self.all, self.table(scope)),
    }
  }
}

/// Overlay `overrides` on top of `base`; entries of `overrides` win on key
/// collision.
pub fn merge(base: &DefaultTable, overrides: &DefaultTable) -> DefaultTable {
  let mut merged = base.clone();
  merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
  merged
}

/// [`merge`] for header tables, where names compare case-insensitively.
///
/// An override replaces every base entry whose name matches it ignoring ASCII
/// case, and keeps its own spelling.
pub fn merge_headers(base: &DefaultTable, overrides: &DefaultTable) -> DefaultTable {
  let mut merged = base.clone();
  for (name, value) in overrides {
    merged.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
    merged.insert(name.clone(), value.clone());
  }
  merged
}

/// Default headers and query parameters held by a request builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
  pub parameters: DefaultTables,
  pub headers: DefaultTables,
}
