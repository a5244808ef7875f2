//! In-memory OpenPGP keyring.
//!
//! Keys enter only through explicit imports and are never written anywhere.
//! Records are keyed by primary key id:
//!
//! - a secret key replaces whatever record has its id
//! - a public key replaces an existing public record, but never a secret one
//!
//! Imports take the write lock; lookups take the read lock and hand out
//! `Arc` clones, so decryption never runs under the lock.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use pgp::composed::signed_key::{self, PublicOrSecret};
use pgp::types::PublicKeyTrait;
use pgp::{SignedPublicKey, SignedSecretKey};
use tracing::{debug, warn};

use crate::core::domain::{KeyId, KeyPurpose};
use crate::error::{Error, Result};

/// Key material held by the keyring.
#[derive(Debug, Clone)]
enum Material {
    Secret(SignedSecretKey),
    Public(SignedPublicKey),
}

/// One imported key.
#[derive(Debug, Clone)]
pub struct KeyRecord {
    id: KeyId,
    material: Material,
}

impl KeyRecord {
    fn secret(key: SignedSecretKey) -> Self {
        Self {
            id: KeyId::from(key.key_id()),
            material: Material::Secret(key),
        }
    }

    fn public(key: SignedPublicKey) -> Self {
        Self {
            id: KeyId::from(key.key_id()),
            material: Material::Public(key),
        }
    }

    /// Primary key id.
    pub fn id(&self) -> &KeyId {
        &self.id
    }

    /// Primary key fingerprint as upper-case hex.
    pub fn fingerprint(&self) -> String {
        let fingerprint = match &self.material {
            Material::Secret(k) => k.fingerprint(),
            Material::Public(k) => k.fingerprint(),
        };
        fingerprint
            .as_bytes()
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect()
    }

    /// User ids bound to the key.
    pub fn user_ids(&self) -> Vec<String> {
        let details = match &self.material {
            Material::Secret(k) => &k.details,
            Material::Public(k) => &k.details,
        };
        details
            .users
            .iter()
            .map(|u| String::from_utf8_lossy(u.id.id()).into_owned())
            .collect()
    }

    /// Creation time of the primary key.
    pub fn created_at(&self) -> DateTime<Utc> {
        match &self.material {
            Material::Secret(k) => *k.created_at(),
            Material::Public(k) => *k.created_at(),
        }
    }

    /// Whether secret key material is present.
    pub fn is_secret(&self) -> bool {
        matches!(self.material, Material::Secret(_))
    }

    /// Whether the primary key or a subkey can receive encrypted messages.
    pub fn can_encrypt(&self) -> bool {
        match &self.material {
            Material::Secret(k) => {
                k.is_encryption_key()
                    || k.secret_subkeys.iter().any(|s| s.key.is_encryption_key())
            }
            Material::Public(k) => {
                k.is_encryption_key()
                    || k.public_subkeys.iter().any(|s| s.key.is_encryption_key())
            }
        }
    }

    /// Whether any secret component is passphrase-protected.
    pub fn is_protected(&self) -> bool {
        match &self.material {
            Material::Secret(k) => {
                k.primary_key.secret_params().is_encrypted()
                    || k
                        .secret_subkeys
                        .iter()
                        .any(|s| s.key.secret_params().is_encrypted())
            }
            Material::Public(_) => false,
        }
    }

    pub(crate) fn secret_key(&self) -> Option<&SignedSecretKey> {
        match &self.material {
            Material::Secret(k) => Some(k),
            Material::Public(_) => None,
        }
    }

    fn serves(&self, purpose: KeyPurpose) -> bool {
        match purpose {
            KeyPurpose::Decrypt => self.is_secret() && self.can_encrypt(),
            KeyPurpose::Encrypt => self.can_encrypt(),
        }
    }
}

/// Set of imported keys, safe to share between threads.
#[derive(Debug, Default)]
pub struct Keyring {
    records: RwLock<BTreeMap<KeyId, Arc<KeyRecord>>>,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import keys from ASCII-armored or binary OpenPGP data.
    ///
    /// `material` may mix secret and public keys. All of them are parsed and
    /// checked before any is stored, so a failed import leaves the keyring
    /// unchanged.
    ///
    /// # Returns
    ///
    /// Primary key ids of the imported keys, in input order.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyParse` if the data holds no valid key.
    pub fn import_keys(&self, material: &[u8]) -> Result<Vec<KeyId>> {
        let parsed = parse_records(material)?;
        let ids: Vec<KeyId> = parsed.iter().map(|r| r.id.clone()).collect();

        let mut records = self.records.write();
        for record in parsed {
            let keep_existing = !record.is_secret()
                && records.get(&record.id).is_some_and(|existing| existing.is_secret());
            if keep_existing {
                debug!(key = %record.id, "keeping secret key over public import");
                continue;
            }
            if records.insert(record.id.clone(), Arc::new(record)).is_some() {
                debug!("replaced existing key record");
            }
        }

        debug!(imported = ids.len(), total = records.len(), "keys imported");
        Ok(ids)
    }

    /// Import keys from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyParse` if the file cannot be read or holds no
    /// valid key.
    pub fn import_key_file(&self, path: &Path) -> Result<Vec<KeyId>> {
        debug!(path = %path.display(), "importing key file");
        let material = std::fs::read(path)
            .map_err(|e| Error::KeyParse(format!("{}: {}", path.display(), e)))?;
        self.import_keys(&material)
    }

    /// Keys usable for `purpose`, ordered by key id.
    pub fn keys_for(&self, purpose: KeyPurpose) -> Vec<Arc<KeyRecord>> {
        self.records
            .read()
            .values()
            .filter(|r| r.serves(purpose))
            .cloned()
            .collect()
    }

    /// Every record, ordered by key id.
    pub fn records(&self) -> Vec<Arc<KeyRecord>> {
        self.records.read().values().cloned().collect()
    }

    pub fn key_ids(&self) -> Vec<KeyId> {
        self.records.read().keys().cloned().collect()
    }

    pub fn contains(&self, id: &KeyId) -> bool {
        self.records.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

fn parse_records(material: &[u8]) -> Result<Vec<KeyRecord>> {
    let (keys, _headers) =
        signed_key::from_reader_many(material).map_err(|e| Error::KeyParse(e.to_string()))?;

    let mut records = Vec::new();
    for key in keys {
        let key = key.map_err(|e| Error::KeyParse(e.to_string()))?;
        key.verify().map_err(|e| {
            Error::KeyParse(format!("bad self-signature on {:X}: {}", primary_id(&key), e))
        })?;
        records.push(match key {
            PublicOrSecret::Secret(k) => KeyRecord::secret(k),
            PublicOrSecret::Public(k) => KeyRecord::public(k),
        });
    }

    if records.is_empty() {
        warn!("key material contained no keys");
        return Err(Error::KeyParse("no OpenPGP keys found".to_string()));
    }
    Ok(records)
}

fn primary_id(key: &PublicOrSecret) -> pgp::types::KeyId {
    match key {
        PublicOrSecret::Secret(k) => k.key_id(),
        PublicOrSecret::Public(k) => k.key_id(),
    }
}
