//! Password store location and scoped access.
//!
//! A store is a directory tree with one encrypted file per credential.
//! Reading it may require permission from the host environment (e.g. a
//! sandboxed, security-scoped resource), abstracted by the `StoreAccess`
//! trait.
//!
//! ## Adding a New Access Backend
//!
//! 1. Implement the `StoreAccess` trait
//! 2. Hand it to `StoreLocation::with_access`
//!
//! ## Example
//!
//! ```ignore
//! struct Bookmark { /* ... */ }
//!
//! impl StoreAccess for Bookmark {
//!     fn begin_access(&self) -> bool {
//!         // Ask the host for permission
//!     }
//!     fn end_access(&self) {
//!         // Give it back
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Error, Result};

mod backend;
mod traverse;

pub use backend::Unrestricted;
pub use traverse::{EntryFilter, StoreTraverser, Traversal};

/// Filesystem access capability supplied by the host environment.
///
/// `end_access` is called exactly once for every `begin_access` that
/// returned `true`, and never otherwise.
pub trait StoreAccess: Send + Sync {
    /// Request access to the store root.
    ///
    /// # Returns
    ///
    /// `true` if access was granted.
    fn begin_access(&self) -> bool;

    /// Release access granted by `begin_access`.
    fn end_access(&self);
}

/// A store root plus the capability needed to read it.
#[derive(Clone)]
pub struct StoreLocation {
    root: PathBuf,
    access: Arc<dyn StoreAccess>,
}

impl StoreLocation {
    /// Store at `root` on an ordinary filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_access(root, Arc::new(Unrestricted))
    }

    /// Store at `root` gated by a host-supplied access capability.
    pub fn with_access(root: impl Into<PathBuf>, access: Arc<dyn StoreAccess>) -> Self {
        Self {
            root: root.into(),
            access,
        }
    }

    /// Store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Begin a scoped access to the store.
    ///
    /// Access ends when the returned scope is dropped.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the host refuses access.
    pub fn acquire(&self) -> Result<AccessScope<'_>> {
        if !self.access.begin_access() {
            debug!(root = %self.root.display(), "store access denied");
            return Err(Error::AccessDenied(self.root.clone()));
        }
        trace!(root = %self.root.display(), "store access acquired");
        Ok(AccessScope { location: self })
    }
}

impl std::fmt::Debug for StoreLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreLocation")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Proof of granted store access; releases it on drop.
pub struct AccessScope<'a> {
    location: &'a StoreLocation,
}

impl AccessScope<'_> {
    /// Store root directory.
    pub fn root(&self) -> &Path {
        self.location.root()
    }
}

impl Drop for AccessScope<'_> {
    fn drop(&mut self) {
        self.location.access.end_access();
        trace!(root = %self.location.root.display(), "store access released");
    }
}
