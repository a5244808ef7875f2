//! Entry decryption.
//!
//! Resolves an entry to its ciphertext and opens it with keyring keys.
//! Each call runs through these stages, releasing store access on the way
//! out whatever the outcome:
//!
//! ```text
//! acquire access -> read ciphertext -> resolve key -> unlock -> decrypt -> decode
//! ```
//!
//! Each stage fails with its own error variant, so callers can tell a
//! missing entry from a missing key, a wrong passphrase, or corruption.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::domain::{DecryptedSecret, KeyHandle, KeyPurpose};
use crate::core::keyring::Keyring;
use crate::core::store::{EntryFilter, StoreLocation};
use crate::error::{Error, Result};

mod openpgp;

/// Supplies the passphrase for a key at decryption time.
///
/// Called synchronously, at most once per decryption, and only for
/// passphrase-protected keys. The returned value is wiped as soon as the
/// call finishes. Returning `None` means no passphrase is available.
///
/// Implemented for every `Fn(&KeyHandle) -> Option<String>`.
pub trait PassphraseResolver {
    fn passphrase(&self, key: &KeyHandle) -> Option<String>;
}

impl<F> PassphraseResolver for F
where
    F: Fn(&KeyHandle) -> Option<String>,
{
    fn passphrase(&self, key: &KeyHandle) -> Option<String> {
        self(key)
    }
}

/// Decrypts store entries with keys from a keyring.
#[derive(Debug, Clone)]
pub struct DecryptionService {
    filter: EntryFilter,
}

impl DecryptionService {
    pub fn new(filter: EntryFilter) -> Self {
        Self { filter }
    }

    /// Decrypt one entry.
    ///
    /// # Arguments
    ///
    /// * `location` - Store holding the entry
    /// * `keyring` - Keys to try
    /// * `entry` - Root-relative entry path, with or without the suffix
    /// * `resolver` - Passphrase source for protected keys
    ///
    /// # Returns
    ///
    /// The decrypted entry text.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if the store cannot be accessed
    /// - `EntryNotFound` if `entry` is not a credential file in the store
    /// - `CiphertextRead` if reading the file fails
    /// - `KeyNotFound` if no imported secret key is a recipient
    /// - `WrongPassphrase` if the passphrase does not unlock the key
    /// - `Decryption` if the ciphertext is malformed or corrupt
    /// - `Encoding` if the plaintext is not UTF-8
    pub fn decrypt(
        &self,
        location: &StoreLocation,
        keyring: &Keyring,
        entry: &str,
        resolver: &dyn PassphraseResolver,
    ) -> Result<DecryptedSecret> {
        let scope = location.acquire()?;

        let relative = self.resolve(entry)?;
        let ciphertext = read_ciphertext(&scope.root().join(&relative), entry)?;
        trace!(entry, ciphertext_len = ciphertext.len(), "ciphertext read");

        let message = openpgp::parse_message(&ciphertext)?;
        let recipients = openpgp::recipients(&message)?;

        let candidates = keyring.keys_for(KeyPurpose::Decrypt);
        let matched = openpgp::find_key(&candidates, &recipients).ok_or_else(|| {
            Error::KeyNotFound {
                recipients: recipients
                    .iter()
                    .map(|r| openpgp::recipient_label(r))
                    .collect(),
            }
        })?;
        let handle = matched.handle();
        debug!(entry, key = %handle.key_id, "decryption key resolved");

        let passphrase = if matched.is_protected() {
            let passphrase = Zeroizing::new(resolver.passphrase(&handle).unwrap_or_default());
            if !matched.unlocks_with(&passphrase) {
                return Err(Error::WrongPassphrase(handle.key_id.to_string()));
            }
            passphrase
        } else {
            Zeroizing::new(String::new())
        };

        let plaintext = Zeroizing::new(openpgp::decrypt_message(
            &message,
            matched.key,
            &passphrase,
        )?);
        let text = String::from_utf8(plaintext.to_vec())?;

        Ok(DecryptedSecret::new(text))
    }

    /// Map user input to a root-relative credential path.
    ///
    /// Appends the suffix when missing and rejects anything outside the
    /// store or under a version-control directory.
    fn resolve(&self, entry: &str) -> Result<PathBuf> {
        if entry.is_empty() {
            return Err(Error::EntryNotFound(String::new()));
        }
        let mut relative = PathBuf::from(entry);
        if !entry.ends_with(self.filter.suffix()) {
            relative = PathBuf::from(format!("{}{}", entry, self.filter.suffix()));
        }

        if !self.filter.admits(&relative) {
            return Err(Error::EntryNotFound(entry.to_string()));
        }
        Ok(relative)
    }
}

fn read_ciphertext(path: &Path, entry: &str) -> Result<Vec<u8>> {
    let read_error = |source| Error::CiphertextRead {
        path: entry.to_string(),
        source,
    };

    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(Error::EntryNotFound(entry.to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::EntryNotFound(entry.to_string()))
        }
        Err(e) => return Err(read_error(e)),
    }

    fs::read(path).map_err(read_error)
}
