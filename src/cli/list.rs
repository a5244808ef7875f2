//! List command.
//!
//! Print every credential entry in the store.

use crate::cli::{output, Global};
use crate::error::Result;

/// List store entries.
pub fn execute(global: &Global, json: bool) -> Result<()> {
    let store = global.open(&[])?;
    let entries = store.entries()?;
    let suffix = store.filter().suffix();

    if json {
        let names: Vec<&str> = entries.iter().map(|e| e.name(suffix)).collect();
        let result = serde_json::json!({
            "entries": names,
            "count": entries.len(),
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if entries.is_empty() {
        output::dimmed("no entries");
    } else {
        output::header(&format!("{} entries", output::count(entries.len())));
        output::rule();
        for entry in &entries {
            println!("  {}", output::path(entry.name(suffix)));
        }
    }

    Ok(())
}
