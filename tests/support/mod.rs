//! Test support utilities for passdig integration tests.
//!
//! Provides reusable store setup, OpenPGP fixtures and helper commands.

#![allow(dead_code)]

pub mod access;
pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use access::*;
#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};

use passdig::core::store::{EntryFilter, StoreLocation};
use passdig::Passwordstore;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own store root and home dir. No process-global
/// state is mutated, so tests can safely run in parallel.
pub struct Test {
    /// Password store root
    pub store: TempDir,
    /// Temporary home directory (key files, config)
    pub home: TempDir,
}

impl Test {
    /// Create an empty store.
    pub fn new() -> Self {
        let store = TempDir::new().expect("failed to create temp store");
        let home = TempDir::new().expect("failed to create temp home");

        Self { store, home }
    }

    /// Create a store holding empty placeholder files at `paths`.
    pub fn with_files(paths: &[&str]) -> Self {
        let t = Self::new();
        for p in paths {
            t.touch(p);
        }
        t
    }

    pub fn root(&self) -> &Path {
        self.store.path()
    }

    /// Write a file under the store root, creating parent directories.
    pub fn write(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.store.path().join(relative);
        fs::create_dir_all(path.parent().expect("path has a parent"))
            .expect("failed to create store dirs");
        fs::write(&path, contents).expect("failed to write store file");
        path
    }

    /// Create a placeholder file under the store root.
    pub fn touch(&self, relative: &str) -> PathBuf {
        self.write(relative, b"placeholder")
    }

    /// Encrypt `plaintext` for `key` and store it at `relative`.
    pub fn add_entry(&self, relative: &str, plaintext: &[u8], key: &KeyPair) -> PathBuf {
        self.write(relative, &key.encrypt(plaintext))
    }

    /// Write a file under the home dir.
    pub fn write_home(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.home.path().join(relative);
        fs::create_dir_all(path.parent().expect("path has a parent"))
            .expect("failed to create home dirs");
        fs::write(&path, contents).expect("failed to write home file");
        path
    }

    /// Session over this store with default naming rules.
    pub fn session(&self) -> Passwordstore {
        Passwordstore::new(StoreLocation::new(self.root()), default_filter())
    }
}

pub fn default_filter() -> EntryFilter {
    EntryFilter::new(".gpg", ".git")
}
