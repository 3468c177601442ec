//! In-process store.
//!
//! Expiry is checked on read against `tokio::time::Instant`, so a paused
//! test runtime controls it. Expired entries are dropped when read, and a
//! full sweep runs every [`SWEEP_INTERVAL`] writes so keys that are never
//! read again do not accumulate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::CacheStore;
use crate::config::{CacheBackend, ttl_millis};
use crate::error::Result;

/// Writes between sweeps of expired entries
pub const SWEEP_INTERVAL: u64 = 64;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Remove expired entries, returning how many were dropped
fn retain_live(entries: &mut HashMap<String, Entry>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|_, e| e.is_live(now));
    before - entries.len()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    writes: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries not yet expired
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        retain_live(&mut *self.entries.write().await, now)
    }

    /// Entries held, expired or not
    #[cfg(test)]
    async fn stored(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let millis = ttl_millis(ttl)?;
        let now = Instant::now();
        let expires_at = now + Duration::from_millis(millis);

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), Entry { value, expires_at });

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % SWEEP_INTERVAL == 0 {
            let purged = retain_live(&mut entries, now);
            if purged > 0 {
                tracing::trace!(purged, remaining = entries.len(), "Swept expired entries");
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|e| e.is_live(now)))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let mut deleted = 0;
        for key in keys {
            if entries.remove(key).is_some_and(|e| e.is_live(now)) {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .await
            .get(key)
            .is_some_and(|e| e.is_live(now)))
    }

    fn backend(&self) -> CacheBackend {
        CacheBackend::Memory
    }
}
