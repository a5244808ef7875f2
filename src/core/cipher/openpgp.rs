//! OpenPGP message handling.
//!
//! Recipient lookup, key unlocking and message decryption on top of the
//! `pgp` crate. Every `pgp` failure is translated into the specific
//! crate error for the stage it happened in.

use pgp::composed::Esk;
use pgp::packet::{PublicKeyEncryptedSessionKey, SecretKey, SecretSubkey};
use pgp::types::{PublicKeyTrait, SecretKeyTrait};
use pgp::{Deserializable, Message, SignedSecretKey};
use tracing::trace;

use crate::core::domain::{KeyHandle, KeyId};
use crate::core::keyring::KeyRecord;
use crate::error::{Error, Result};

/// Parse an encrypted entry, armored or binary.
pub(super) fn parse_message(ciphertext: &[u8]) -> Result<Message> {
    let (message, _headers) = Message::from_reader_single(ciphertext)
        .map_err(|e| Error::Decryption(format!("malformed OpenPGP message: {}", e)))?;
    Ok(message)
}

/// Public-key recipients of an encrypted message.
pub(super) fn recipients(message: &Message) -> Result<Vec<&PublicKeyEncryptedSessionKey>> {
    let Message::Encrypted { esk, .. } = message else {
        return Err(Error::Decryption("entry is not an encrypted message".to_string()));
    };

    let recipients: Vec<_> = esk
        .iter()
        .filter_map(|e| match e {
            Esk::PublicKeyEncryptedSessionKey(k) => Some(k),
            Esk::SymKeyEncryptedSessionKey(_) => None,
        })
        .collect();

    if recipients.is_empty() {
        return Err(Error::Decryption(
            "message has no public-key recipients".to_string(),
        ));
    }
    Ok(recipients)
}

/// Printable id of a recipient, for error messages.
pub(super) fn recipient_label(pkesk: &PublicKeyEncryptedSessionKey) -> String {
    if let Ok(id) = pkesk.id() {
        if id.is_wildcard() {
            return "anonymous".to_string();
        }
        return KeyId::from(id).to_string();
    }
    match pkesk.fingerprint() {
        Ok(Some(fp)) => fp.as_bytes().iter().map(|b| format!("{:02X}", b)).collect(),
        _ => "anonymous".to_string(),
    }
}

/// The secret (sub)key a recipient packet is addressed to.
pub(super) enum Component<'a> {
    Primary(&'a SecretKey),
    Subkey(&'a SecretSubkey),
}

impl Component<'_> {
    fn key_id(&self) -> KeyId {
        match self {
            Component::Primary(k) => KeyId::from(k.key_id()),
            Component::Subkey(k) => KeyId::from(k.key_id()),
        }
    }

    fn is_protected(&self) -> bool {
        match self {
            Component::Primary(k) => k.secret_params().is_encrypted(),
            Component::Subkey(k) => k.secret_params().is_encrypted(),
        }
    }

    fn unlocks_with(&self, passphrase: &str) -> bool {
        // pgp takes the passphrase as an owned `String`, so each unlock
        // hands it a copy that is not wiped on our side.
        let result = match self {
            Component::Primary(k) => k.unlock(|| passphrase.to_string(), |_| Ok(())),
            Component::Subkey(k) => k.unlock(|| passphrase.to_string(), |_| Ok(())),
        };
        result.is_ok()
    }
}

/// A keyring key able to open the message, plus the matching component.
pub(super) struct Matched<'a> {
    pub key: &'a SignedSecretKey,
    pub component: Component<'a>,
}

impl Matched<'_> {
    /// Description handed to the passphrase resolver.
    pub fn handle(&self) -> KeyHandle {
        KeyHandle {
            key_id: self.component.key_id(),
            primary_key_id: KeyId::from(self.key.key_id()),
            user_id: self
                .key
                .details
                .users
                .first()
                .map(|u| String::from_utf8_lossy(u.id.id()).into_owned()),
        }
    }

    pub fn is_protected(&self) -> bool {
        self.component.is_protected()
    }

    pub fn unlocks_with(&self, passphrase: &str) -> bool {
        self.component.unlocks_with(passphrase)
    }
}

/// Find the first key, in keyring order, addressed by any recipient.
pub(super) fn find_key<'a>(
    candidates: &'a [std::sync::Arc<KeyRecord>],
    recipients: &[&PublicKeyEncryptedSessionKey],
) -> Option<Matched<'a>> {
    candidates
        .iter()
        .filter_map(|record| record.secret_key())
        .find_map(|key| {
            recipients.iter().find_map(|pkesk| {
                if pkesk.match_identity(&key.primary_key) {
                    return Some(Matched {
                        key,
                        component: Component::Primary(&key.primary_key),
                    });
                }
                key.secret_subkeys
                    .iter()
                    .find(|sub| pkesk.match_identity(&sub.key))
                    .map(|sub| Matched {
                        key,
                        component: Component::Subkey(&sub.key),
                    })
            })
        })
}

/// Decrypt `message` with an unlocked key and return the literal content.
pub(super) fn decrypt_message(
    message: &Message,
    key: &SignedSecretKey,
    passphrase: &str,
) -> Result<Vec<u8>> {
    // Owned copy for pgp, as in `Component::unlocks_with`.
    let (decrypted, _ids) = message
        .decrypt(|| passphrase.to_string(), &[key])
        .map_err(|e| Error::Decryption(e.to_string()))?;

    let decrypted = decrypted
        .decompress()
        .map_err(|e| Error::Decryption(format!("decompression failed: {}", e)))?;

    let content = decrypted
        .get_content()
        .map_err(|e| Error::Decryption(e.to_string()))?
        .ok_or_else(|| Error::Decryption("message carries no literal data".to_string()))?;

    trace!(plaintext_len = content.len(), "message decrypted");
    Ok(content)
}
