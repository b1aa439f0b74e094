// Quote collection and its durable persistence.
//
// The store owns the in-memory sequence and the durable slot store backing
// it. Every mutation persists immediately, so the in-memory sequence and the
// `"quotes"` slot never diverge while the app is running.

use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::db::Database;
use crate::model::{dedup_first_occurrence, default_quotes, Quote};

/// Durable slot holding the serialized quote sequence.
pub const QUOTES_SLOT: &str = "quotes";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("quote text and category must both be non-empty")]
    EmptyField,

    #[error("failed to persist quotes: {0}")]
    Persist(anyhow::Error),
}

// ---------------------------------------------------------------------------
// QuoteStore
// ---------------------------------------------------------------------------

/// Result of merging the remote sequence into the local one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Quotes in the store after the merge.
    pub total: usize,
    /// Entries removed by de-duplication.
    pub duplicates_dropped: usize,
}

/// The in-memory quote sequence plus its durable backing store.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    db: Database,
}

impl QuoteStore {
    /// Load the store from the `"quotes"` slot, seeding the two-element
    /// default set when the slot is absent or unreadable.
    pub fn load(db: Database) -> Self {
        let quotes = read_quotes_slot(&db);
        QuoteStore { quotes, db }
    }

    /// Serialize the sequence and overwrite the durable slot.
    pub fn save(&self) -> Result<(), StoreError> {
        let value = serde_json::to_value(&self.quotes)
            .map_err(|e| StoreError::Persist(e.into()))?;
        self.db
            .save_slot(QUOTES_SLOT, &value)
            .map_err(StoreError::Persist)
    }

    /// Validate, append, and persist a new quote. Returns the added quote so
    /// the caller can forward it to the remote endpoint.
    pub fn add(&mut self, text: String, category: String) -> Result<Quote, StoreError> {
        if text.is_empty() || category.is_empty() {
            return Err(StoreError::EmptyField);
        }
        let quote = Quote { text, category };
        self.quotes.push(quote.clone());
        self.save()?;
        Ok(quote)
    }

    /// Append already-validated quotes (file import) and persist.
    pub fn append(&mut self, quotes: Vec<Quote>) -> Result<usize, StoreError> {
        let count = quotes.len();
        self.quotes.extend(quotes);
        self.save()?;
        Ok(count)
    }

    /// Re-read the sequence from the durable slot, discarding the in-memory
    /// copy. Used after import to rebuild the full application state from
    /// storage.
    pub fn reload(&mut self) {
        self.quotes = read_quotes_slot(&self.db);
    }

    /// Merge the remote sequence into the local one: remote-then-local,
    /// de-duplicated by exact `(text, category)` match keeping the first
    /// occurrence (so the remote copy wins ties), then persist.
    pub fn reconcile(&mut self, remote: Vec<Quote>) -> Result<ReconcileOutcome, StoreError> {
        let mut merged = remote;
        merged.extend(self.quotes.drain(..));
        let before = merged.len();
        self.quotes = dedup_first_occurrence(merged);
        self.save()?;
        Ok(ReconcileOutcome {
            total: self.quotes.len(),
            duplicates_dropped: before - self.quotes.len(),
        })
    }

    /// A uniformly random quote, or `None` when the store is empty.
    pub fn random(&self) -> Option<&Quote> {
        if self.quotes.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.quotes.len());
        self.quotes.get(index)
    }

    /// Distinct categories in insertion order of first occurrence.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for quote in &self.quotes {
            if !categories.iter().any(|c| c == &quote.category) {
                categories.push(quote.category.clone());
            }
        }
        categories
    }

    /// All quotes, or exactly those whose category equals `category`.
    pub fn filtered(&self, category: Option<&str>) -> Vec<Quote> {
        match category {
            None => self.quotes.clone(),
            Some(cat) => self
                .quotes
                .iter()
                .filter(|q| q.category == cat)
                .cloned()
                .collect(),
        }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}

/// Read and decode the `"quotes"` slot, falling back to the default set
/// when the slot is absent or unreadable.
fn read_quotes_slot(db: &Database) -> Vec<Quote> {
    match db.load_slot(QUOTES_SLOT) {
        Ok(Some(value)) => match serde_json::from_value::<Vec<Quote>>(value) {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!("quotes slot holds malformed data, using defaults: {e}");
                default_quotes()
            }
        },
        Ok(None) => default_quotes(),
        Err(e) => {
            warn!("failed to read quotes slot, using defaults: {e}");
            default_quotes()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
