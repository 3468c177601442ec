//! # App Context
//!
//! Handles owned by the composition root and injected into request handlers.

use basecamp_cache::SharedCacheClient;
use basecamp_config::Settings;
use basecamp_db::client::DbClient;
use std::sync::Arc;

/// Application context shared across all handlers
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Cache client handle
    pub cache: SharedCacheClient,

    /// Database client (connects on first query)
    pub db: Arc<DbClient>,

    /// Resolved startup settings
    pub settings: Arc<Settings>,
}

impl AppContext {
    pub fn new(cache: SharedCacheClient, db: DbClient, settings: Settings) -> Self {
        Self {
            cache,
            db: Arc::new(db),
            settings: Arc::new(settings),
        }
    }
}

/// Builder for AppContext
#[derive(Default)]
pub struct AppContextBuilder {
    cache: Option<SharedCacheClient>,
    db: Option<DbClient>,
    settings: Option<Settings>,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cache(mut self, cache: SharedCacheClient) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_db(mut self, db: DbClient) -> Self {
        self.db = Some(db);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// # Errors
    ///
    /// Returns a message naming the first missing handle.
    pub fn build(self) -> Result<AppContext, &'static str> {
        let cache = self.cache.ok_or("cache client required")?;
        let db = self.db.ok_or("database client required")?;
        let settings = self.settings.ok_or("settings required")?;
        Ok(AppContext::new(cache, db, settings))
    }
}
