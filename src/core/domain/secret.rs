//! Decrypted secret type.
//!
//! Holds the plaintext of one entry for as long as the caller keeps it.
//! Memory is wiped on drop and the value never shows up in `Debug` output.

use zeroize::Zeroizing;

/// Plaintext contents of a decrypted entry.
pub struct DecryptedSecret {
    text: Zeroizing<String>,
}

impl DecryptedSecret {
    pub(crate) fn new(text: String) -> Self {
        Self {
            text: Zeroizing::new(text),
        }
    }

    /// Full decrypted text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Decrypted bytes, exactly as stored in the entry.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// First line of the entry, which by convention holds the password.
    pub fn password(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Debug for DecryptedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptedSecret")
            .field("len", &self.text.len())
            .finish_non_exhaustive()
    }
}
