//! Command-line interface.

pub mod completions;
pub mod keys;
pub mod list;
pub mod output;
pub mod search;
pub mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::config::{self, Config};
use crate::core::session::Passwordstore;
use crate::error::Result;

/// Passdig - Fuzzy search and decryption for OpenPGP password stores.
#[derive(Parser)]
#[command(
    name = "passdig",
    about = "Fuzzy search and decryption for OpenPGP password stores",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: <config dir>/passdig/config.toml)
    #[arg(long, global = true, env = "PASSDIG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Password store directory
    #[arg(long, global = true, env = "PASSWORD_STORE_DIR")]
    pub store: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Fuzzy-search entry paths
    Search {
        /// Text to match against entry paths
        query: String,
        /// Minimum score, exclusive (default from config)
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every entry in the store
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decrypt and print an entry
    Show {
        /// Entry path, with or without the suffix (e.g. email/github)
        entry: String,
        /// Key file to import before decrypting (repeatable)
        #[arg(short, long = "key", value_name = "FILE")]
        keys: Vec<PathBuf>,
    },

    /// List imported keys
    Keys {
        /// Key file to import (repeatable)
        #[arg(short, long = "key", value_name = "FILE")]
        keys: Vec<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Options shared by every command.
pub struct Global {
    pub config: Option<PathBuf>,
    pub store: Option<PathBuf>,
}

impl Global {
    /// Open a session, importing configured keys plus `extra_keys`.
    pub fn open(&self, extra_keys: &[PathBuf]) -> Result<Passwordstore> {
        let config = Config::load(self.config.as_deref())?;
        let store = match &self.store {
            Some(dir) => Passwordstore::from_config_at(&config, config::expand_home(dir))?,
            None => Passwordstore::from_config(&config)?,
        };
        debug!(root = %store.location().root().display(), "store opened");

        for path in extra_keys {
            let ids = store.import_key_file(path)?;
            debug!(path = %path.display(), keys = ids.len(), "imported key file");
        }
        Ok(store)
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    use Command::*;

    let global = Global {
        config: cli.config,
        store: cli.store,
    };

    match cli.command {
        Search {
            query,
            threshold,
            json,
        } => search::execute(&global, &query, threshold, json),
        Ls { json } => list::execute(&global, json),
        Show { entry, keys: files } => show::execute(&global, &entry, &files),
        Keys { keys: files, json } => keys::execute(&global, &files, json),
        Completions { shell } => completions::execute(shell),
    }
}
