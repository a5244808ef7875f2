//! Passdig - Fuzzy search and decryption for OpenPGP password stores.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use passdig::cli::output;
use passdig::cli::{execute, Cli};
use passdig::core::constants;
use passdig::error::Error;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("passdig=debug")
        } else {
            EnvFilter::new("passdig=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::AccessDenied(_) => Some("check the store path and its permissions"),
            Error::EntryNotFound(_) => Some("run: passdig search <QUERY>"),
            Error::KeyNotFound { .. } => Some("import the recipient's secret key with --key FILE"),
            Error::WrongPassphrase(_) => Some("check the passphrase for this key"),
            Error::Config(_) | Error::TomlParse(_) => Some("check config.toml or pass --config"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
