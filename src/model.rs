// Core quote data type and collection helpers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single quote: free text plus the category it is filed under.
///
/// There are no identifiers, timestamps, or versions. Two quotes are the
/// same quote exactly when both fields match byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Identity used for sync de-duplication. Exact string match — no case
    /// or whitespace normalization.
    pub fn key(&self) -> (&str, &str) {
        (&self.text, &self.category)
    }
}

/// The quotes a fresh installation starts with when the durable slot is
/// empty.
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only limit to our realization of tomorrow is our doubts of today",
            "Inspirational",
        ),
        Quote::new(
            "Success is not final, failure is not fatal: It is the courage to continue that counts.",
            "Life Decision",
        ),
    ]
}

/// Drop duplicate quotes, keeping the first occurrence of each
/// `(text, category)` key. Order of the survivors is preserved.
pub fn dedup_first_occurrence(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    quotes
        .into_iter()
        .filter(|q| seen.insert((q.text.clone(), q.category.clone())))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
