//! # Bootstrap Error Types
//!
//! Failures while building the application from resolved configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] basecamp_config::ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] basecamp_cache::CacheError),

    #[error("Database error: {0}")]
    Db(#[from] basecamp_db::DbError),
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;
