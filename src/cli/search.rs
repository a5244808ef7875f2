//! Search command.
//!
//! Fuzzy-search entry paths and print the ranked matches.

use crate::cli::{output, Global};
use crate::core::config;
use crate::error::Result;

/// Search the store for `query`.
pub fn execute(global: &Global, query: &str, threshold: Option<f64>, json: bool) -> Result<()> {
    let store = global.open(&[])?;
    let threshold = match threshold {
        Some(t) => {
            config::validate_threshold(t)?;
            t
        }
        None => store.threshold(),
    };

    let results = store.search_with_threshold(query, threshold)?;
    let suffix = store.filter().suffix();

    if json {
        let matches: Vec<_> = results
            .iter()
            .map(|r| {
                serde_json::json!({
                    "name": r.entry.name(suffix),
                    "path": r.entry.path(),
                    "score": r.score,
                })
            })
            .collect();
        let result = serde_json::json!({
            "query": query,
            "threshold": threshold,
            "matches": matches,
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if results.is_empty() {
        output::dimmed("no matches");
    } else {
        for r in &results {
            println!("{}  {}", output::score(r.score), output::path(r.entry.name(suffix)));
        }
    }

    Ok(())
}
