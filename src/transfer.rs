// JSON file export and import of the quote collection.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::Quote;

/// Write the full quote sequence to `path` as a JSON array. Returns the
/// number of quotes written.
pub fn export_quotes(quotes: &[Quote], path: &Path) -> Result<usize> {
    let json = serde_json::to_string_pretty(quotes).context("failed to serialize quotes")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(quotes.len())
}

/// Read a JSON file containing an array of quotes. A file that does not
/// parse as a quote array is an error; the caller surfaces it and leaves
/// the store untouched.
pub fn import_quotes(path: &Path) -> Result<Vec<Quote>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let quotes: Vec<Quote> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid quote file", path.display()))?;
    Ok(quotes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
