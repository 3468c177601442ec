//! Configuration error types

use thiserror::Error;

/// Errors raised while turning resolved environment values into settings.
///
/// Missing files and missing variables are never errors; only values that
/// are present but unusable end up here.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("DATABASE_URL is not set; the build placeholder cannot be used for a live connection")]
    PlaceholderDatabaseUrl,
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
