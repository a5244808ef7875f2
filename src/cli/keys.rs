//! Keys command.
//!
//! Import key files and describe what the keyring holds.

use std::path::PathBuf;

use crate::cli::{output, Global};
use crate::error::Result;

/// List imported keys.
pub fn execute(global: &Global, keys: &[PathBuf], json: bool) -> Result<()> {
    let store = global.open(keys)?;
    let records = store.keyring().records();

    if json {
        let keys_json: Vec<_> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id(),
                    "fingerprint": r.fingerprint(),
                    "user_ids": r.user_ids(),
                    "created_at": r.created_at().to_rfc3339(),
                    "secret": r.is_secret(),
                    "protected": r.is_protected(),
                    "can_encrypt": r.can_encrypt(),
                })
            })
            .collect();
        let result = serde_json::json!({
            "keys": keys_json,
            "count": records.len(),
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if records.is_empty() {
        output::dimmed("no keys imported");
        output::hint("import a key with --key FILE or [keys] files in config.toml");
    } else {
        output::header(&format!("{} keys", output::count(records.len())));
        output::rule();
        for record in &records {
            let kind = match (record.is_secret(), record.is_protected()) {
                (true, true) => "secret, protected",
                (true, false) => "secret",
                (false, _) => "public",
            };
            println!("{}  {}", output::key(record.id().as_str()), kind);
            for user in record.user_ids() {
                output::kv("uid", user);
            }
            output::kv("fingerprint", record.fingerprint());
            output::kv("created", record.created_at().format("%Y-%m-%d"));
        }
    }

    Ok(())
}
