//! In-memory TTL cache for endpoint responses.
//!
//! Values are cached as serialized JSON so a cache hit returns exactly
//! the bytes the original computation produced. Expiry is lazy: `get`
//! treats an expired entry as absent, and the entry itself is only
//! replaced by the next `set` for its key. Writers race last-writer-wins,
//! which is fine because every value is an idempotent snapshot of
//! upstream state.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct CachedEntry {
    value: Value,
    expires_at: Instant,
}

/// A time-expiring key/value store shared by the request handlers and
/// the background poller.
#[derive(Default)]
pub struct TtlCache {
    entries: RwLock<HashMap<String, CachedEntry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key` if present and not expired.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Stores `value` under `key` with expiry `now + ttl`, overwriting
    /// any existing entry.
    pub async fn set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = CachedEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }
}
