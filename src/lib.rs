//! Passdig - Fuzzy search and decryption for OpenPGP password stores.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── search        # Fuzzy search
//! │   ├── list          # List entries
//! │   ├── show          # Decrypt an entry
//! │   ├── keys          # Inspect imported keys
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # config.toml management
//!     ├── matcher       # Fuzzy scoring
//!     ├── store/        # Store location and traversal
//!     │   ├── mod       # StoreAccess trait, scoped access
//!     │   ├── backend   # Unrestricted access
//!     │   └── traverse  # Entry filter and lazy walk
//!     ├── search        # Ranked search
//!     ├── keyring       # In-memory OpenPGP keyring
//!     ├── cipher/       # Entry decryption
//!     │   ├── mod       # DecryptionService, PassphraseResolver
//!     │   └── openpgp   # pgp message handling
//!     └── session       # Passwordstore session
//! ```
//!
//! # Features
//!
//! - Fuzzy search over entry paths with a tunable threshold
//! - Version-control directories excluded from traversal
//! - Pure-Rust OpenPGP decryption, no gpg agent required
//! - Injected passphrase resolver, passphrases wiped after use
//! - Host-controlled store access for sandboxed environments
//!
//! # Example
//!
//! ```no_run
//! use passdig::core::domain::KeyHandle;
//! use passdig::{Config, Passwordstore};
//!
//! let store = Passwordstore::from_config(&Config::default())?;
//! store.import_key_file("private.asc".as_ref())?;
//!
//! if let Some(best) = store.search("github")?.first() {
//!     let resolver = |_: &KeyHandle| Some("passphrase".to_string());
//!     let secret = store.decrypt(best.entry.path(), &resolver)?;
//!     println!("{}", secret.password());
//! }
//! # Ok::<(), passdig::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::cipher::PassphraseResolver;
pub use crate::core::config::Config;
pub use crate::core::session::Passwordstore;
pub use crate::core::store::{StoreAccess, StoreLocation};
pub use crate::error::{Error, Result};
