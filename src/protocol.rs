// Message types exchanged between the TUI, the app orchestrator, and the
// sync tasks.
//
// The TUI sends `UserCommand`s, background tasks send `SyncEvent`s, and the
// orchestrator pushes `UiUpdate`s back. All quote mutations happen inside
// the orchestrator loop, one message at a time.

use std::path::PathBuf;

use crate::model::Quote;

// ---------------------------------------------------------------------------
// TUI -> app
// ---------------------------------------------------------------------------

/// A user action forwarded from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Show a uniformly random quote.
    ShowRandom,
    /// Add a new quote. Validation happens in the store, not the TUI.
    AddQuote { text: String, category: String },
    /// Advance the category filter: All -> first -> ... -> last -> All.
    CycleCategory,
    /// Write the full quote sequence to the configured export file.
    Export,
    /// Read a JSON quote file and append its contents to the store.
    Import { path: PathBuf },
    Quit,
}

// ---------------------------------------------------------------------------
// Sync tasks -> app
// ---------------------------------------------------------------------------

/// Outcome of a background network operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// The periodic fetch decoded a remote quote sequence.
    RemoteFetched(Vec<Quote>),
    /// The periodic fetch failed (network, status, or decode). Logged and
    /// dropped; no retry.
    FetchFailed(String),
    /// A pushed quote was accepted by the server.
    PushCompleted(Quote),
    /// A pushed quote was rejected or never arrived. Logged only.
    PushFailed { quote: Quote, message: String },
}

// ---------------------------------------------------------------------------
// App -> TUI
// ---------------------------------------------------------------------------

/// Sync indicator shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Sync is turned off in config.
    Disabled,
    /// No fetch has completed yet.
    Pending,
    /// The last fetch reconciled successfully.
    Synced,
    /// The last fetch failed.
    Error,
}

/// Full view-relevant state, rebuilt by the orchestrator after every
/// mutation and applied by the TUI in one shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    /// The quote currently shown in the display panel.
    pub current_quote: Option<Quote>,
    /// Quotes visible in the list (already filtered).
    pub quotes: Vec<Quote>,
    /// Distinct categories in first-occurrence order (without the "All"
    /// sentinel, which is a rendering concern).
    pub categories: Vec<String>,
    /// Active category filter; `None` means All.
    pub active_category: Option<String>,
    /// Total quotes in the store, ignoring the filter.
    pub total_quotes: usize,
    pub sync_status: SyncStatus,
    /// Wall-clock time of the last successful sync, formatted for display.
    pub last_synced: Option<String>,
}

/// A display update pushed from the orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    Snapshot(Box<AppSnapshot>),
    /// Transient bottom-right notification (disappears after a few
    /// seconds).
    Notice(String),
    /// Modal alert; blocks input until dismissed.
    Alert(String),
}
