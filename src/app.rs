// Application state and orchestration logic.
//
// The central event loop that coordinates user commands from the TUI and
// events from the sync tasks. Owns the quote store and the session slot
// store; every quote mutation happens here, one message at a time, and each
// one is followed by a fresh snapshot pushed to the TUI.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::Database;
use crate::model::Quote;
use crate::protocol::{AppSnapshot, SyncEvent, SyncStatus, UiUpdate, UserCommand};
use crate::store::{QuoteStore, ReconcileOutcome, StoreError};
use crate::sync::{self, SyncClient};

/// Session-scoped slot holding the last displayed quote.
pub const LAST_VIEWED_SLOT: &str = "last_viewed_quote";

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub store: QuoteStore,
    /// In-memory slot store; lives exactly as long as the process.
    pub session: Database,
    /// Remote client, shared with spawned push tasks.
    pub sync_client: Arc<SyncClient>,
    /// Sender for sync events; push tasks use a clone to report outcomes
    /// back to this loop.
    pub sync_tx: mpsc::Sender<SyncEvent>,
    pub active_category: Option<String>,
    pub current_quote: Option<Quote>,
    pub sync_status: SyncStatus,
    pub last_synced: Option<String>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: QuoteStore,
        session: Database,
        sync_client: Arc<SyncClient>,
        sync_tx: mpsc::Sender<SyncEvent>,
    ) -> Self {
        let sync_status = if sync_client.is_active() {
            SyncStatus::Pending
        } else {
            SyncStatus::Disabled
        };
        AppState {
            config,
            store,
            session,
            sync_client,
            sync_tx,
            active_category: None,
            current_quote: None,
            sync_status,
            last_synced: None,
        }
    }

    /// Build an `AppSnapshot` from the current state. The quote list is
    /// already filtered by the active category.
    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            current_quote: self.current_quote.clone(),
            quotes: self.store.filtered(self.active_category.as_deref()),
            categories: self.store.categories(),
            active_category: self.active_category.clone(),
            total_quotes: self.store.len(),
            sync_status: self.sync_status,
            last_synced: self.last_synced.clone(),
        }
    }

    /// Pick a uniformly random quote, record it in the session slot, and
    /// make it the displayed quote. Returns `None` when the store is empty.
    pub fn show_random(&mut self) -> Option<Quote> {
        let quote = self.store.random()?.clone();
        match serde_json::to_value(&quote) {
            Ok(value) => {
                if let Err(e) = self.session.save_slot(LAST_VIEWED_SLOT, &value) {
                    warn!("failed to record last viewed quote: {e}");
                }
            }
            Err(e) => warn!("failed to serialize last viewed quote: {e}"),
        }
        self.current_quote = Some(quote.clone());
        Some(quote)
    }

    /// Validate and append a new quote. On success the quote is also pushed
    /// to the remote endpoint as a fire-and-forget task.
    pub fn add_quote(&mut self, text: String, category: String) -> Result<Quote, StoreError> {
        let quote = self.store.add(text, category)?;
        info!("added quote in category {}", quote.category);
        sync::spawn_push(
            Arc::clone(&self.sync_client),
            quote.clone(),
            self.sync_tx.clone(),
        );
        Ok(quote)
    }

    /// Advance the category filter: All -> first -> ... -> last -> All.
    pub fn cycle_category(&mut self) {
        let categories = self.store.categories();
        self.active_category = match &self.active_category {
            None => categories.first().cloned(),
            Some(current) => {
                let idx = categories.iter().position(|c| c == current);
                match idx {
                    Some(i) if i + 1 < categories.len() => Some(categories[i + 1].clone()),
                    // Last category, or the active one no longer exists:
                    // wrap back to All.
                    _ => None,
                }
            }
        };
    }

    /// Write the full quote sequence to the configured export file.
    /// Returns the count and the path written.
    pub fn export_quotes(&self) -> anyhow::Result<(usize, String)> {
        let path = self.config.export.path.clone();
        let count = crate::transfer::export_quotes(self.store.quotes(), Path::new(&path))?;
        info!("exported {count} quotes to {path}");
        Ok((count, path))
    }

    /// Read a quote file, append its contents, persist, and rebuild the
    /// full application state from storage (filter reset, display cleared).
    /// Returns the number of quotes imported.
    pub fn import_quotes(&mut self, path: &Path) -> anyhow::Result<usize> {
        let quotes = crate::transfer::import_quotes(path)?;
        let count = self.store.append(quotes)?;
        info!("imported {count} quotes from {}", path.display());

        self.store.reload();
        self.active_category = None;
        self.current_quote = None;
        Ok(count)
    }

    /// Merge a fetched remote sequence into the store: remote-then-local,
    /// de-duplicated keeping the first occurrence.
    pub fn apply_remote(&mut self, remote: Vec<Quote>) -> Result<ReconcileOutcome, StoreError> {
        let outcome = self.store.reconcile(remote)?;
        self.sync_status = SyncStatus::Synced;
        self.last_synced = Some(chrono::Local::now().format("%H:%M:%S").to_string());
        info!(
            "synced with server: {} quotes, {} duplicates dropped",
            outcome.total, outcome.duplicates_dropped
        );
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the app orchestrator until the TUI disconnects or the user quits.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut sync_rx: mpsc::Receiver<SyncEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    // Initial snapshot so the TUI has something to draw immediately.
    send_snapshot(&ui_tx, &state).await;

    loop {
        tokio::select! {
            command = cmd_rx.recv() => {
                match command {
                    Some(command) => {
                        if !handle_command(command, &mut state, &ui_tx).await {
                            break;
                        }
                    }
                    None => break, // TUI gone
                }
            }

            event = sync_rx.recv() => {
                match event {
                    Some(event) => handle_sync_event(event, &mut state, &ui_tx).await,
                    None => break, // all senders dropped
                }
            }
        }
    }

    info!("app orchestrator shutting down");
    Ok(())
}

/// Process one user command. Returns `false` when the loop should exit.
async fn handle_command(
    command: UserCommand,
    state: &mut AppState,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> bool {
    match command {
        UserCommand::ShowRandom => {
            if state.show_random().is_none() {
                send(ui_tx, UiUpdate::Alert("No quotes to show yet.".to_string())).await;
            }
            send_snapshot(ui_tx, state).await;
        }

        UserCommand::AddQuote { text, category } => {
            match state.add_quote(text, category) {
                Ok(_) => {
                    send(ui_tx, UiUpdate::Alert("Quote added successfully!".to_string())).await;
                }
                Err(StoreError::EmptyField) => {
                    send(
                        ui_tx,
                        UiUpdate::Alert(
                            "Please enter both quote text and a category.".to_string(),
                        ),
                    )
                    .await;
                }
                Err(e) => {
                    warn!("failed to add quote: {e}");
                    send(ui_tx, UiUpdate::Alert(format!("Failed to add quote: {e}"))).await;
                }
            }
            send_snapshot(ui_tx, state).await;
        }

        UserCommand::CycleCategory => {
            state.cycle_category();
            send_snapshot(ui_tx, state).await;
        }

        UserCommand::Export => {
            match state.export_quotes() {
                Ok((count, path)) => {
                    send(
                        ui_tx,
                        UiUpdate::Alert(format!("Exported {count} quotes to {path}")),
                    )
                    .await;
                }
                Err(e) => {
                    warn!("export failed: {e:#}");
                    send(ui_tx, UiUpdate::Alert(format!("Export failed: {e}"))).await;
                }
            }
        }

        UserCommand::Import { path } => {
            match state.import_quotes(&path) {
                Ok(_) => {
                    send(
                        ui_tx,
                        UiUpdate::Alert("Quotes imported successfully!".to_string()),
                    )
                    .await;
                }
                Err(e) => {
                    warn!("import failed: {e:#}");
                    send(ui_tx, UiUpdate::Alert(format!("Import failed: {e}"))).await;
                }
            }
            send_snapshot(ui_tx, state).await;
        }

        UserCommand::Quit => return false,
    }
    true
}

/// Process one sync event.
async fn handle_sync_event(
    event: SyncEvent,
    state: &mut AppState,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match event {
        SyncEvent::RemoteFetched(remote) => {
            match state.apply_remote(remote) {
                Ok(_) => {
                    send(
                        ui_tx,
                        UiUpdate::Notice("Quotes synced with server!".to_string()),
                    )
                    .await;
                }
                Err(e) => warn!("failed to persist reconciled quotes: {e}"),
            }
            send_snapshot(ui_tx, state).await;
        }

        SyncEvent::FetchFailed(message) => {
            // Logged and dropped; no retry, no user-facing alert.
            warn!("sync fetch failed: {message}");
            state.sync_status = SyncStatus::Error;
            send_snapshot(ui_tx, state).await;
        }

        SyncEvent::PushCompleted(quote) => {
            debug!("pushed quote in category {} to server", quote.category);
        }

        SyncEvent::PushFailed { quote, message } => {
            warn!(
                "failed to push quote in category {}: {message}",
                quote.category
            );
        }
    }
}

async fn send(ui_tx: &mpsc::Sender<UiUpdate>, update: UiUpdate) {
    let _ = ui_tx.send(update).await;
}

async fn send_snapshot(ui_tx: &mpsc::Sender<UiUpdate>, state: &AppState) {
    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(state.build_snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
