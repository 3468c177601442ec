// @generated by the data-access client generator. Do not edit by hand.
//
// Regenerate instead; import through `basecamp_db::client`, never from this
// module directly.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Version of the generator that produced this module
pub const GENERATOR_VERSION: &str = "0.1.0";

/// Errors returned by the generated client
pub type ClientError = sqlx::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Connection pool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientOptions {
    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Data-access client over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    /// Create the pool without opening a connection.
    /// Must be called from within a Tokio runtime.
    pub fn connect_lazy(url: &str, options: &ClientOptions) -> ClientResult<Self> {
        let pool = options.pool_options().connect_lazy(url)?;
        Ok(Self { pool })
    }

    /// Create the pool and open a first connection
    pub async fn connect(url: &str, options: &ClientOptions) -> ClientResult<Self> {
        let pool = options.pool_options().connect(url).await?;
        Ok(Self { pool })
    }

    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ping(&self) -> ClientResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
