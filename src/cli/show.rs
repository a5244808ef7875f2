//! Show command.
//!
//! Decrypt one entry and print its contents. The passphrase is read from
//! stdin when it is piped, otherwise prompted with hidden input.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::{output, Global};
use crate::core::domain::KeyHandle;
use crate::error::Result;

/// Decrypt and print an entry.
pub fn execute(global: &Global, entry: &str, keys: &[PathBuf]) -> Result<()> {
    let store = global.open(keys)?;
    let secret = store.decrypt(entry, &prompt_passphrase)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(secret.as_bytes())?;
    if !secret.as_str().ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;

    Ok(())
}

fn prompt_passphrase(key: &KeyHandle) -> Option<String> {
    if !io::stdin().is_terminal() {
        let mut line = Zeroizing::new(String::new());
        if let Err(e) = io::stdin().read_line(&mut line) {
            debug!(error = %e, "cannot read passphrase from stdin");
            return None;
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        return Some(std::mem::take(&mut *line));
    }

    Password::new()
        .with_prompt(format!("Passphrase for {}", output::key(&key.to_string())))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| debug!(error = %e, "passphrase prompt failed"))
        .ok()
}
