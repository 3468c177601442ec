//! Cache configuration

use basecamp_config::{FALLBACK_REDIS_URL, Settings};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Lifetime applied to entries written without an explicit TTL
pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);

/// Store implementation selected from the URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// `redis://`, `rediss://`, `redis+unix://`, `unix://`
    Redis,
    /// `memory://` - in-process, per-handle store
    Memory,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => f.write_str("redis"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Cache client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub url: String,
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: FALLBACK_REDIS_URL.to_string(),
            default_ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Bind to the resolved `REDIS_URL` (or its fallback) with the default TTL
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            url: settings.redis_url.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Config for the in-process store
    pub fn memory() -> Self {
        Self {
            url: "memory://".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Which store the URL selects
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidUrl`] for a missing or unsupported scheme.
    pub fn backend(&self) -> Result<CacheBackend> {
        let scheme = self
            .url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| CacheError::InvalidUrl {
                url: self.url.clone(),
                reason: "missing scheme".to_string(),
            })?;

        match scheme.as_str() {
            "redis" | "rediss" | "redis+unix" | "unix" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(CacheError::InvalidUrl {
                url: self.url.clone(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

/// Validate a TTL and convert it to whole milliseconds
pub(crate) fn ttl_millis(ttl: Duration) -> Result<u64> {
    if ttl.as_millis() == 0 {
        return Err(CacheError::InvalidTtl(ttl));
    }
    Ok(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
}
