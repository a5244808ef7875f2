//! Store traversal.
//!
//! Walks the store tree and yields every credential entry, skipping files
//! without the credential suffix and pruning version-control directories.

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::AccessScope;
use crate::core::domain::Entry;

/// Naming rules deciding which files are credential entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    suffix: String,
    vcs_marker: String,
}

impl EntryFilter {
    pub fn new(suffix: impl Into<String>, vcs_marker: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            vcs_marker: vcs_marker.into(),
        }
    }

    /// Credential file suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Version-control directory token.
    pub fn vcs_marker(&self) -> &str {
        &self.vcs_marker
    }

    /// Whether a file name carries the credential suffix.
    pub fn is_credential_name(&self, name: &OsStr) -> bool {
        name.to_string_lossy().ends_with(&self.suffix)
    }

    /// Whether a directory name marks version-control bookkeeping.
    pub fn is_excluded_dir(&self, name: &OsStr) -> bool {
        name.to_string_lossy().contains(&self.vcs_marker)
    }

    /// Whether a root-relative path names a credential entry.
    ///
    /// The path must stay inside the root, carry the suffix, and have no
    /// directory component containing the VCS marker. The file name itself
    /// is exempt from the marker check.
    pub fn admits(&self, relative: &Path) -> bool {
        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::CurDir => {}
                _ => return false,
            }
        }

        let Some((file_name, dirs)) = parts.split_last() else {
            return false;
        };
        self.is_credential_name(file_name) && !dirs.iter().any(|d| self.is_excluded_dir(d))
    }
}

/// Enumerates credential entries under a store root.
#[derive(Debug, Clone)]
pub struct StoreTraverser {
    filter: EntryFilter,
}

impl StoreTraverser {
    pub fn new(filter: EntryFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    /// Start a lazy walk of the store.
    ///
    /// The traversal owns `scope`, so store access lasts exactly as long as
    /// the iterator, whether or not it is fully consumed. An unreadable root
    /// yields nothing.
    pub fn walk<'a>(&self, scope: AccessScope<'a>) -> Traversal<'a> {
        let root = scope.root().to_path_buf();
        let mut stack = Vec::new();
        match fs::read_dir(&root) {
            Ok(entries) => stack.push((PathBuf::new(), entries)),
            Err(e) => debug!(root = %root.display(), error = %e, "cannot enumerate store root"),
        }

        Traversal {
            _scope: scope,
            root,
            filter: self.filter.clone(),
            stack,
        }
    }
}

/// Lazy iterator over the credential entries of a store.
///
/// Depth-first, in directory-enumeration order. Symlinked directories are
/// not followed, so no node is visited twice. Files and directories whose
/// names are not valid UTF-8 are skipped: an entry path must round-trip
/// through `Entry::path` back to the same file.
pub struct Traversal<'a> {
    _scope: AccessScope<'a>,
    root: PathBuf,
    filter: EntryFilter,
    stack: Vec<(PathBuf, fs::ReadDir)>,
}

impl Iterator for Traversal<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            let (dir, entries) = self.stack.last_mut()?;
            let Some(item) = entries.next() else {
                self.stack.pop();
                continue;
            };
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    debug!(dir = %dir.display(), error = %e, "skipping unreadable node");
                    continue;
                }
            };

            let name = item.file_name();
            if name.to_str().is_none() {
                debug!(dir = %dir.display(), name = ?name, "skipping non-UTF-8 name");
                continue;
            }
            let relative = dir.join(&name);
            let file_type = match item.file_type() {
                Ok(t) => t,
                Err(e) => {
                    debug!(path = %relative.display(), error = %e, "skipping node");
                    continue;
                }
            };

            if file_type.is_dir() {
                if self.filter.is_excluded_dir(&name) {
                    debug!(path = %relative.display(), "pruning version-control directory");
                    continue;
                }
                match fs::read_dir(self.root.join(&relative)) {
                    Ok(children) => self.stack.push((relative, children)),
                    Err(e) => {
                        debug!(path = %relative.display(), error = %e, "skipping unreadable directory")
                    }
                }
                continue;
            }

            let is_file = file_type.is_file()
                || (file_type.is_symlink()
                    && fs::metadata(item.path()).map(|m| m.is_file()).unwrap_or(false));
            if is_file && self.filter.is_credential_name(&name) {
                return Some(Entry::from_relative(&relative));
            }
        }
    }
}
