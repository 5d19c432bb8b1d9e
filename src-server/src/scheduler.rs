//! Background poller for upstream rate data.
//!
//! Runs a fixed-interval loop that refreshes the latest currency quotes
//! and the crypto symbol list in the shared cache, so `/latest` and
//! `/crypto` usually answer without touching upstream. A failed cycle is
//! logged and swallowed; the next cycle proceeds regardless.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::main_lib::AppState;

/// Cache key the poller refreshes for `/latest`.
pub const LATEST_DATA_KEY: &str = "latest_data";

/// Cache key the poller refreshes for `/crypto`.
pub const CRYPTO_DATA_KEY: &str = "crypto_data";

/// Handle to a running poller. Dropping it also stops the loop.
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Signals the poller to stop at its next suspension point.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Waits for the poller task to finish.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Starts the background poller as a detached task.
pub fn start_poller(state: Arc<AppState>, interval: Duration) -> PollerHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        info!("Rate poller started ({:?} interval)", interval);
        loop {
            poll_once(&state).await;
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Rate poller stopped");
                        break;
                    }
                }
            }
        }
    });
    PollerHandle { shutdown_tx, task }
}

/// Runs a single poll cycle: latest quotes, then crypto symbols.
async fn poll_once(state: &AppState) {
    match state.bonbast.latest().await {
        Ok(latest) => match serde_json::to_value(&latest) {
            Ok(value) => {
                state
                    .cache
                    .set(LATEST_DATA_KEY, value, state.cache_ttl)
                    .await;
                info!(currencies = latest.len(), "Latest quotes refreshed");
            }
            Err(e) => warn!("Failed to serialize latest quotes: {}", e),
        },
        Err(e) => warn!("Latest quote fetch failed: {}", e),
    }

    match state.wallex.symbols().await {
        Ok(symbols) => {
            state
                .cache
                .set(CRYPTO_DATA_KEY, symbols, state.cache_ttl)
                .await;
            info!("Crypto symbols refreshed");
        }
        Err(e) => warn!("Crypto fetch failed: {}", e),
    }
}
