//! Redis store.
//!
//! The connection is opened on first use, so an unreachable server surfaces
//! as an error from the first cache call rather than at startup.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::time::Duration;
use tokio::sync::OnceCell;

use super::CacheStore;
use crate::config::{CacheBackend, ttl_millis};
use crate::error::{CacheError, Result};

pub struct RedisStore {
    client: Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisStore {
    /// Parse the URL without contacting the server
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidUrl`] if the URL is malformed.
    pub fn open(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(|e| CacheError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    /// Shared multiplexed connection, created on first call
    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                tracing::debug!("Opening Redis connection");
                ConnectionManager::new(self.client.clone()).await
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let millis = ttl_millis(ttl)?;
        let mut conn = self.connection().await?;
        let _: () = conn.pset_ex(key, value, millis).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        let deleted: u64 = conn.del(keys).await?;
        Ok(deleted)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    fn backend(&self) -> CacheBackend {
        CacheBackend::Redis
    }
}
