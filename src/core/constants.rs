//! Constants used throughout passdig.
//!
//! Centralizes magic strings and default settings.

/// Suffix marking an OpenPGP-encrypted entry.
pub const CREDENTIAL_SUFFIX: &str = ".gpg";

/// Directory-name token identifying version-control bookkeeping.
pub const VCS_MARKER: &str = ".git";

/// Default search threshold on the fuzzy score scale.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default store directory relative to HOME (~/.password-store).
pub const STORE_DIR: &str = ".password-store";

/// Configuration directory name under the platform config dir.
pub const CONFIG_DIR: &str = "passdig";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the store location.
pub const STORE_DIR_ENV: &str = "PASSWORD_STORE_DIR";

/// Environment variable overriding the configuration file.
pub const CONFIG_ENV: &str = "PASSDIG_CONFIG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PASSDIG_LOG";
