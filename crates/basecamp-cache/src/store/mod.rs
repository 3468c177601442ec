//! # Cache Stores
//!
//! Backends behind a [`CacheClient`](crate::CacheClient). Values are stored
//! as strings; typed access lives on the client.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

use async_trait::async_trait;
use std::time::Duration;

use crate::config::CacheBackend;
use crate::error::Result;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;

/// Key-value store with per-entry expiration
///
/// Implementations must be safe for concurrent use from many tasks.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value`, expiring `ttl` after the write
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<bool>;

    async fn delete_many(&self, keys: &[String]) -> Result<u64>;

    async fn exists(&self, key: &str) -> Result<bool>;

    fn backend(&self) -> CacheBackend;
}
