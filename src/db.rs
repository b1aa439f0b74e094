// SQLite persistence layer for named JSON slots.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

/// SQLite-backed key-value slot store. Each slot holds one JSON value under
/// a unique name; saving overwrites the previous value.
///
/// The durable store opens a file on disk; the session store uses
/// `open_in_memory` and lives exactly as long as the process.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the slot store at `path` and ensure the schema
    /// exists.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;
        Self::init(conn)
    }

    /// Open an ephemeral in-memory slot store. Contents are discarded when
    /// the database is dropped, which gives session-scoped lifetime.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS slots (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Persist a JSON value under `key`. Uses INSERT OR REPLACE so repeated
    /// saves overwrite the previous value.
    pub fn save_slot(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let conn = self.conn();
        let json_str = serde_json::to_string(value).context("failed to serialize slot value")?;
        conn.execute(
            "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
            params![key, json_str],
        )
        .context("failed to save slot")?;
        Ok(())
    }

    /// Load a previously saved JSON value by `key`. Returns `None` if the
    /// slot does not exist.
    pub fn load_slot(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT value FROM slots WHERE key = ?1")
            .context("failed to prepare load_slot query")?;

        let mut rows = stmt
            .query_map(params![key], |row| {
                let json_str: String = row.get(0)?;
                Ok(json_str)
            })
            .context("failed to query slot")?;

        match rows.next() {
            Some(row_result) => {
                let json_str = row_result.context("failed to read slot row")?;
                let value: serde_json::Value = serde_json::from_str(&json_str)
                    .context("failed to deserialize slot value")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
