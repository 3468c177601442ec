//! Database layer error types

use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database client error: {0}")]
    Client(#[from] ClientError),

    #[error("Database configuration error: {0}")]
    Config(#[from] basecamp_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, DbError>;
