//! Entry and match types.
//!
//! An entry is one credential file, identified by its path relative to the
//! store root.

use std::path::{Component, Path};

use serde::Serialize;

/// A credential file inside the password store.
///
/// The path is always `/`-separated and relative to the store root,
/// including the credential suffix (e.g. `email/github.gpg`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Entry {
    path: String,
}

impl Entry {
    /// Build an entry from a path relative to the store root.
    pub fn from_relative(relative: &Path) -> Self {
        let path = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        Self { path }
    }

    /// Path relative to the store root, suffix included.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path with the credential suffix removed, as users type it.
    pub fn name<'a>(&'a self, suffix: &str) -> &'a str {
        self.path.strip_suffix(suffix).unwrap_or(&self.path)
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// A search hit: an entry and its fuzzy score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub entry: Entry,
    pub score: f64,
}
