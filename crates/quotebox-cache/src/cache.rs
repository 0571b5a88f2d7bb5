use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Five minutes
pub const DEFAULT_TTL_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: i64,
}

/// In-memory TTL cache keyed by request
///
/// Only for requests whose key is a pure function of their parameters.
/// Random fetches must never go through here. Expired entries are evicted
/// lazily, on the read that finds them stale.
pub struct ResponseCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_TTL_MS, Arc::new(SystemClock))
    }

    pub fn with_ttl(ttl_ms: i64) -> Self {
        Self::with_clock(ttl_ms, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl_ms: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl_ms,
            clock,
        }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_millis();
        let mut entries = self.lock();

        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => now > entry.expires_at,
        };

        if expired {
            debug!("Cache entry expired: {}", key);
            entries.remove(key);
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    pub fn set(&self, key: &str, value: V) {
        let expires_at = self.clock.now_millis().saturating_add(self.ttl_ms);
        self.lock()
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, stale ones included until something reads them
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Serve from cache, or run `fetch` and remember a successful result
    ///
    /// Failures are handed back untouched and never cached.
    pub async fn get_or_insert_with<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key) {
            debug!("Returning cached result for: {}", key);
            return Ok(hit);
        }

        let value = fetch().await?;
        self.set(key, value.clone());
        Ok(value)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // A panic mid-insert can't leave the map half-written, so poison is safe to ignore
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
