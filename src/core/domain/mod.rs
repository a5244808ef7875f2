//! Domain types.

mod entry;
mod key;
mod secret;

pub use entry::{Entry, MatchResult};
pub use key::{KeyHandle, KeyId, KeyPurpose};
pub use secret::DecryptedSecret;
