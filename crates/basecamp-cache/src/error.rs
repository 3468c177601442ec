//! Cache layer error types

use std::time::Duration;
use thiserror::Error;

/// Cache layer errors
///
/// Backend failures are converted, never retried or swallowed here.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid cache URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid TTL {0:?}: must be at least 1ms")]
    InvalidTtl(Duration),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Redis(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
