//! # Cache Client
//!
//! Typed cache handle with a default entry lifetime. One client is built by
//! the composition root and shared as [`SharedCacheClient`].

use basecamp_config::Settings;
use basecamp_config::settings::redact_url;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{CacheBackend, CacheConfig};
use crate::error::Result;
#[cfg(feature = "redis")]
use crate::store::RedisStore;
use crate::store::{CacheStore, MemoryStore};

/// Cache client bound to one store and a default TTL
#[derive(Clone)]
pub struct CacheClient {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl std::fmt::Debug for CacheClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheClient")
            .field("backend", &self.store.backend())
            .field("url", &redact_url(&self.config.url))
            .field("default_ttl", &self.config.default_ttl)
            .finish()
    }
}

impl CacheClient {
    /// Build a client for the configured URL.
    ///
    /// The backend is not contacted here; connection problems show up on
    /// the first operation.
    ///
    /// # Errors
    ///
    /// Returns an error only if the URL is malformed or its scheme is not
    /// supported.
    pub fn connect(config: CacheConfig) -> Result<Self> {
        let backend = config.backend()?;
        let store: Arc<dyn CacheStore> = match backend {
            #[cfg(feature = "redis")]
            CacheBackend::Redis => Arc::new(RedisStore::open(&config.url)?),
            #[cfg(not(feature = "redis"))]
            CacheBackend::Redis => {
                return Err(crate::error::CacheError::InvalidUrl {
                    url: config.url.clone(),
                    reason: "built without the `redis` feature".to_string(),
                });
            }
            CacheBackend::Memory => Arc::new(MemoryStore::new()),
        };

        tracing::info!(
            %backend,
            url = %redact_url(&config.url),
            default_ttl_ms = config.default_ttl.as_millis(),
            "Cache client configured"
        );

        Ok(Self { store, config })
    }

    /// Build a client from resolved settings with the default TTL
    ///
    /// # Errors
    ///
    /// See [`CacheClient::connect`].
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::connect(CacheConfig::from_settings(settings))
    }

    /// Wrap an existing store
    pub fn with_store(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    pub const fn default_ttl(&self) -> Duration {
        self.config.default_ttl
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn backend(&self) -> CacheBackend {
        self.store.backend()
    }

    /// Underlying store for advanced operations
    pub fn store(&self) -> Arc<dyn CacheStore> {
        self.store.clone()
    }

    // =========================================================================
    // TYPED OPERATIONS
    // =========================================================================

    /// Get a JSON value from cache
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a JSON value with the default TTL
    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        self.set_json_with_ttl(key, value, self.config.default_ttl)
            .await
    }

    /// Set a JSON value with a caller-chosen TTL
    pub async fn set_json_with_ttl<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, json, ttl).await
    }

    // =========================================================================
    // RAW OPERATIONS
    // =========================================================================

    pub async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key).await
    }

    /// Set a raw string with the default TTL
    pub async fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<()> {
        self.store
            .set(key, value.into(), self.config.default_ttl)
            .await
    }

    pub async fn set_raw_with_ttl(
        &self,
        key: &str,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Result<()> {
        self.store.set(key, value.into(), ttl).await
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.store.delete(key).await
    }

    /// Delete multiple keys
    pub async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        self.store.delete_many(keys).await
    }

    /// Check if key exists
    pub async fn exists(&self, key: &str) -> Result<bool> {
        self.store.exists(key).await
    }
}

/// Shared cache client handle
pub type SharedCacheClient = Arc<CacheClient>;

/// Create a shared cache client
pub fn shared_cache(client: CacheClient) -> SharedCacheClient {
    Arc::new(client)
}
