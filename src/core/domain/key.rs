//! Key identity types.
//!
//! Wraps OpenPGP key ids in a form that sorts, prints and serializes
//! consistently, and describes the key a passphrase is requested for.

use serde::Serialize;

/// A 64-bit OpenPGP key id, rendered as 16 upper-case hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct KeyId(String);

impl KeyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&pgp::types::KeyId> for KeyId {
    fn from(id: &pgp::types::KeyId) -> Self {
        Self(format!("{:X}", id))
    }
}

impl From<pgp::types::KeyId> for KeyId {
    fn from(id: pgp::types::KeyId) -> Self {
        Self::from(&id)
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a caller wants to do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPurpose {
    /// Secret keys able to open messages addressed to them.
    Decrypt,
    /// Any key able to receive encrypted messages.
    Encrypt,
}

/// The key a passphrase is being requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHandle {
    /// Id of the (sub)key that must be unlocked.
    pub key_id: KeyId,
    /// Id of the primary key it belongs to.
    pub primary_key_id: KeyId,
    /// Primary user id of the key, if it has one.
    pub user_id: Option<String>,
}

impl std::fmt::Display for KeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.user_id {
            Some(user) => write!(f, "{} ({})", user, self.key_id),
            None => write!(f, "{}", self.key_id),
        }
    }
}
