//! Configuration file management.
//!
//! Reads and validates the optional `config.toml`. Every field has a
//! default, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::matcher::MAX_SCORE;
use crate::core::store::EntryFilter;
use crate::error::{Error, Result};

/// User configuration stored in `<config dir>/passdig/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store layout
    pub store: StoreConfig,
    /// Search tuning
    pub search: SearchConfig,
    /// Keys imported at startup
    pub keys: KeysConfig,
}

/// `[store]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store root. Defaults to `~/.password-store`.
    pub path: Option<PathBuf>,
    /// Credential file suffix
    pub suffix: String,
    /// Directory-name token excluded from traversal
    pub vcs_marker: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            suffix: constants::CREDENTIAL_SUFFIX.to_string(),
            vcs_marker: constants::VCS_MARKER.to_string(),
        }
    }
}

/// `[search]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: constants::DEFAULT_THRESHOLD,
        }
    }
}

/// `[keys]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Key files, armored or binary
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join(constants::CONFIG_FILE))
    }

    /// Load configuration.
    ///
    /// Looks at `explicit`, then `PASSDIG_CONFIG`, then the default path.
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a named file is missing or the values are
    /// invalid, and `Error::TomlParse` if the TOML is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(constants::CONFIG_ENV).map(PathBuf::from));

        let config = match named {
            Some(path) => Self::load_from(&path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or fails
    /// validation, or `Error::TomlParse` if the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;

        debug!(
            key_files = config.keys.files.len(),
            threshold = config.search.threshold,
            "config loaded"
        );
        Ok(config)
    }

    /// Validate field values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` on an empty suffix or marker, or a threshold
    /// outside `[0, MAX_SCORE]`.
    pub fn validate(&self) -> Result<()> {
        if self.store.suffix.is_empty() {
            return Err(Error::Config("store.suffix must not be empty".to_string()));
        }
        if self.store.vcs_marker.is_empty() {
            return Err(Error::Config(
                "store.vcs_marker must not be empty".to_string(),
            ));
        }
        validate_threshold(self.search.threshold)
    }

    /// Store root after env override and `~` expansion.
    ///
    /// `PASSWORD_STORE_DIR` wins over `store.path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if no home directory can be determined.
    pub fn store_root(&self) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(constants::STORE_DIR_ENV) {
            return Ok(expand_home(Path::new(&dir)));
        }
        match &self.store.path {
            Some(path) => Ok(expand_home(path)),
            None => dirs::home_dir()
                .map(|h| h.join(constants::STORE_DIR))
                .ok_or_else(|| Error::Config("cannot determine home directory".to_string())),
        }
    }

    /// Key files with `~` expanded.
    pub fn key_files(&self) -> Vec<PathBuf> {
        self.keys.files.iter().map(|p| expand_home(p)).collect()
    }

    /// Entry naming rules for this store.
    pub fn entry_filter(&self) -> EntryFilter {
        EntryFilter::new(&self.store.suffix, &self.store.vcs_marker)
    }
}

/// Check a threshold lies on the score scale.
///
/// # Errors
///
/// Returns `Error::Config` if `threshold` is NaN or outside `[0, MAX_SCORE]`.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=MAX_SCORE).contains(&threshold) {
        return Err(Error::Config(format!(
            "threshold must be between 0 and {}, got {}",
            MAX_SCORE, threshold
        )));
    }
    Ok(())
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
