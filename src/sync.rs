// Remote sync: HTTP client, the periodic fetch task, and fire-and-forget
// quote pushes.
//
// Network work never touches the quote store directly. Fetch results and
// push outcomes travel to the app orchestrator as `SyncEvent`s, so every
// mutation happens inside the orchestrator loop.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Config;
use crate::model::Quote;
use crate::protocol::SyncEvent;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("server returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to decode server response: {source}")]
    Decode { source: reqwest::Error },
}

// ---------------------------------------------------------------------------
// SyncClient
// ---------------------------------------------------------------------------

/// Remote client, present only when sync is enabled in config.
pub enum SyncClient {
    Active(RemoteClient),
    Disabled,
}

impl SyncClient {
    pub fn from_config(config: &Config) -> Self {
        if config.remote.enabled {
            SyncClient::Active(RemoteClient::new(config.remote.url.clone()))
        } else {
            SyncClient::Disabled
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SyncClient::Active(_))
    }
}

/// HTTP client for the fixed remote endpoint.
pub struct RemoteClient {
    http: reqwest::Client,
    url: String,
}

impl RemoteClient {
    pub fn new(url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the remote quote sequence. Any failure — network, non-2xx
    /// status, or a body that does not decode as a quote array — is an
    /// error the caller logs and drops.
    pub async fn fetch_quotes(&self) -> Result<Vec<Quote>, SyncError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SyncError::Request {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { status });
        }

        response
            .json::<Vec<Quote>>()
            .await
            .map_err(|e| SyncError::Decode { source: e })
    }

    /// POST a newly added quote. Any 2xx response is success; the body is
    /// ignored.
    pub async fn push_quote(&self, quote: &Quote) -> Result<(), SyncError> {
        let response = self
            .http
            .post(&self.url)
            .json(quote)
            .send()
            .await
            .map_err(|e| SyncError::Request {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { status });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Background tasks
// ---------------------------------------------------------------------------

/// Periodic fetch loop. Every `interval`, GET the remote sequence and
/// forward the result as a `SyncEvent`. Runs until the receiving side of
/// `tx` closes (or the task is aborted at shutdown). A `Disabled` client
/// returns immediately.
pub async fn run(client: Arc<SyncClient>, interval: Duration, tx: mpsc::Sender<SyncEvent>) {
    let SyncClient::Active(client) = &*client else {
        debug!("sync disabled, periodic fetch not started");
        return;
    };

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // tokio intervals fire immediately; consume the first tick so fetches
    // start one full interval after launch.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        let event = match client.fetch_quotes().await {
            Ok(quotes) => {
                debug!("fetched {} quotes from {}", quotes.len(), client.url());
                SyncEvent::RemoteFetched(quotes)
            }
            Err(e) => {
                warn!("periodic fetch failed: {e}");
                SyncEvent::FetchFailed(e.to_string())
            }
        };

        if tx.send(event).await.is_err() {
            // Orchestrator gone; nothing left to sync for.
            return;
        }
    }
}

/// Fire-and-forget push of a newly added quote. The outcome is reported
/// back over `tx` so completion and failure are observable; the app only
/// logs it. Returns `None` when sync is disabled.
pub fn spawn_push(
    client: Arc<SyncClient>,
    quote: Quote,
    tx: mpsc::Sender<SyncEvent>,
) -> Option<JoinHandle<()>> {
    if !client.is_active() {
        return None;
    }
    Some(tokio::spawn(async move {
        let SyncClient::Active(client) = &*client else {
            return;
        };
        let event = match client.push_quote(&quote).await {
            Ok(()) => SyncEvent::PushCompleted(quote),
            Err(e) => SyncEvent::PushFailed {
                quote,
                message: e.to_string(),
            },
        };
        let _ = tx.send(event).await;
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ExportConfig, RemoteConfig, StorageConfig};

    fn config(enabled: bool) -> Config {
        Config {
            remote: RemoteConfig {
                enabled,
                url: "http://127.0.0.1:1/quotes".to_string(),
                sync_interval_secs: 60,
            },
            storage: StorageConfig { path: None },
            export: ExportConfig {
                path: "quotes.json".to_string(),
            },
        }
    }

    #[test]
    fn from_config_active_when_enabled() {
        let client = SyncClient::from_config(&config(true));
        assert!(client.is_active());
        match client {
            SyncClient::Active(remote) => {
                assert_eq!(remote.url(), "http://127.0.0.1:1/quotes");
            }
            SyncClient::Disabled => panic!("expected Active"),
        }
    }

    #[test]
    fn from_config_disabled_when_turned_off() {
        let client = SyncClient::from_config(&config(false));
        assert!(!client.is_active());
    }

    #[test]
    fn spawn_push_disabled_returns_none() {
        let (tx, _rx) = mpsc::channel(4);
        let handle = spawn_push(
            Arc::new(SyncClient::Disabled),
            Quote::new("A", "X"),
            tx,
        );
        assert!(handle.is_none());
    }

    #[tokio::test]
    async fn spawn_push_failure_is_observable() {
        // Port 1 refuses connections, so the push fails fast and the
        // failure arrives as an event rather than vanishing.
        let (tx, mut rx) = mpsc::channel(4);
        let client = Arc::new(SyncClient::from_config(&config(true)));
        let handle = spawn_push(client, Quote::new("A", "X"), tx).expect("active client spawns");

        let event = rx.recv().await.expect("push outcome event");
        match event {
            SyncEvent::PushFailed { quote, message } => {
                assert_eq!(quote, Quote::new("A", "X"));
                assert!(!message.is_empty());
            }
            other => panic!("expected PushFailed, got {other:?}"),
        }
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn fetch_failure_is_an_error() {
        let client = RemoteClient::new("http://127.0.0.1:1/quotes".to_string());
        let err = client.fetch_quotes().await.unwrap_err();
        assert!(matches!(err, SyncError::Request { .. }));
    }

    #[tokio::test]
    async fn run_with_disabled_client_returns() {
        let (tx, _rx) = mpsc::channel(4);
        // Must complete immediately rather than looping.
        run(
            Arc::new(SyncClient::Disabled),
            Duration::from_secs(60),
            tx,
        )
        .await;
    }
}
