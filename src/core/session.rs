//! Password store session.
//!
//! A `Passwordstore` owns one store location, its entry rules and a keyring.
//! It is the entry point hosts use: search the store, pick an entry,
//! decrypt it.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::cipher::{DecryptionService, PassphraseResolver};
use crate::core::config::{self, Config};
use crate::core::domain::{DecryptedSecret, Entry, KeyId, MatchResult};
use crate::core::keyring::Keyring;
use crate::core::search::SearchEngine;
use crate::core::store::{EntryFilter, StoreLocation, StoreTraverser};
use crate::error::Result;

/// Search and decrypt session over one password store.
///
/// `Send + Sync`: searches and decryptions may run on several threads at
/// once, and keys may be imported while they do.
#[derive(Debug)]
pub struct Passwordstore {
    location: StoreLocation,
    keyring: Keyring,
    engine: SearchEngine,
    decryptor: DecryptionService,
    threshold: f64,
}

impl Passwordstore {
    /// Session over `location` with the default threshold and an empty keyring.
    pub fn new(location: StoreLocation, filter: EntryFilter) -> Self {
        Self {
            location,
            keyring: Keyring::new(),
            engine: SearchEngine::new(StoreTraverser::new(filter.clone())),
            decryptor: DecryptionService::new(filter),
            threshold: crate::core::constants::DEFAULT_THRESHOLD,
        }
    }

    /// Session built from configuration, with configured key files imported.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the store root cannot be determined, or
    /// `Error::KeyParse` if a configured key file is unusable.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_at(config, config.store_root()?)
    }

    /// Like `from_config`, over an explicit store root.
    pub fn from_config_at(config: &Config, root: impl Into<PathBuf>) -> Result<Self> {
        config.validate()?;

        let store = Self::new(StoreLocation::new(root), config.entry_filter())
            .with_threshold(config.search.threshold)?;
        for path in config.key_files() {
            store.import_key_file(&path)?;
        }

        info!(root = %store.location.root().display(), keys = store.keyring.len(), "session ready");
        Ok(store)
    }

    /// Replace the default search threshold.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `threshold` is outside `[0, MAX_SCORE]`.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        config::validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Entry naming rules of this store.
    pub fn filter(&self) -> &EntryFilter {
        self.engine.traverser().filter()
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Search with the session threshold.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the store cannot be accessed.
    pub fn search(&self, query: &str) -> Result<Vec<MatchResult>> {
        self.search_with_threshold(query, self.threshold)
    }

    /// Search with an explicit threshold.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the store cannot be accessed.
    pub fn search_with_threshold(&self, query: &str, threshold: f64) -> Result<Vec<MatchResult>> {
        debug!(threshold, "searching store");
        self.engine.search(&self.location, query, threshold)
    }

    /// Every credential entry, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the store cannot be accessed.
    pub fn entries(&self) -> Result<Vec<Entry>> {
        let scope = self.location.acquire()?;
        let mut entries: Vec<Entry> = self.engine.traverser().walk(scope).collect();
        entries.sort();
        Ok(entries)
    }

    /// Decrypt an entry with the session keyring.
    ///
    /// `entry` may omit the credential suffix. See
    /// `DecryptionService::decrypt` for the failure modes.
    pub fn decrypt(
        &self,
        entry: &str,
        resolver: &dyn PassphraseResolver,
    ) -> Result<DecryptedSecret> {
        self.decryptor
            .decrypt(&self.location, &self.keyring, entry, resolver)
    }

    /// Import keys from armored or binary OpenPGP data.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyParse` on malformed material; the keyring is left
    /// unchanged.
    pub fn import_keys(&self, material: &[u8]) -> Result<Vec<KeyId>> {
        self.keyring.import_keys(material)
    }

    /// Import keys from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyParse` if the file is unreadable or malformed.
    pub fn import_key_file(&self, path: &Path) -> Result<Vec<KeyId>> {
        self.keyring.import_key_file(path)
    }
}
