use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("access denied: cannot open password store at {0}")]
    AccessDenied(PathBuf),

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("failed to read {path}: {source}")]
    CiphertextRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid key material: {0}")]
    KeyParse(String),

    #[error("no imported key can decrypt this entry (recipients: {})", .recipients.join(", "))]
    KeyNotFound { recipients: Vec<String> },

    #[error("wrong passphrase for key {0}")]
    WrongPassphrase(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("decrypted entry is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
