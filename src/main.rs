// quotedeck entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the durable database and the session-scoped store
// 4. Load the quote store (seeding defaults on first run)
// 5. Create mpsc channels
// 6. Build the sync client from config
// 7. Spawn the periodic sync task
// 8. Spawn the app orchestrator task
// 9. Run the TUI event loop (blocking until the user quits)
// 10. Cleanup on exit

use quotedeck::app;
use quotedeck::config;
use quotedeck::db::Database;
use quotedeck::store::QuoteStore;
use quotedeck::sync::{self, SyncClient};
use quotedeck::tui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("quotedeck starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: remote={}, sync every {}s, sync enabled={}",
        config.remote.url, config.remote.sync_interval_secs, config.remote.enabled
    );

    // 3. Open the durable database and the session-scoped store
    let db_path = config.database_path().context("failed to resolve database path")?;
    let db = Database::open(&db_path).context("failed to open database")?;
    info!("Database opened at {db_path}");
    let session = Database::open_in_memory().context("failed to open session store")?;

    // 4. Load the quote store
    let store = QuoteStore::load(db);
    info!("Loaded {} quotes", store.len());

    // 5. Create mpsc channels
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (sync_tx, sync_rx) = mpsc::channel(64);

    // 6. Build the sync client from config
    let sync_client = Arc::new(SyncClient::from_config(&config));
    match &*sync_client {
        SyncClient::Active(_) => info!("Sync client initialized"),
        SyncClient::Disabled => info!("Sync client disabled"),
    }

    // 7. Spawn the periodic sync task
    let sync_interval = Duration::from_secs(config.remote.sync_interval_secs);
    let sync_handle = tokio::spawn(sync::run(
        Arc::clone(&sync_client),
        sync_interval,
        sync_tx.clone(),
    ));

    // 8. Spawn the app orchestrator task
    let app_state = app::AppState::new(config, store, session, sync_client, sync_tx);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, sync_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 9. Run the TUI event loop (blocking until the user quits)
    info!("Application ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 10. Cleanup: wait for the app task to finish (with timeout), then
    // abort the sync timer (it loops for the lifetime of the process).
    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;
    sync_handle.abort();

    info!("quotedeck shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("quotedeck.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quotedeck=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
