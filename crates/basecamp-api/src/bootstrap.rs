//! # Bootstrap
//!
//! Startup sequence: resolve the environment first, then build every handle
//! from that one explicit configuration object.

use basecamp_cache::{CacheClient, shared_cache};
use basecamp_config::{
    DatasourceConfig, EnvLoader, Layout, LoadedEnv, Settings, SourceStatus, WebBuildConfig,
};
use basecamp_db::client::ClientOptions;
use serde_json::json;

use crate::context::AppContext;
use crate::error::BootstrapResult;

/// Web app location relative to the monorepo root
pub const WEB_APP_DIR: &str = "apps/web";

/// Configuration resolved before any component initialises
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub layout: Layout,
    pub env: LoadedEnv,
    pub settings: Settings,
    pub datasource: DatasourceConfig,
}

impl Bootstrap {
    /// Run the loader and resolve settings
    ///
    /// # Errors
    ///
    /// Fails only on present-but-malformed values; missing files and
    /// variables fall back.
    pub fn resolve(loader: &EnvLoader) -> BootstrapResult<Self> {
        let layout = loader.layout().clone();
        let env = loader.load();
        let settings = Settings::from_env(&env)?;
        let datasource = DatasourceConfig::for_service(layout.service_dir(), &settings);

        Ok(Self {
            layout,
            env,
            settings,
            datasource,
        })
    }

    /// Build the cache and database handles and bundle them.
    /// Neither backend is contacted. Must run inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if a connection URL is malformed.
    pub fn build_context(&self) -> BootstrapResult<AppContext> {
        let cache = shared_cache(CacheClient::from_settings(&self.settings)?);
        let db =
            basecamp_db::datasource::connect_lazy(&self.datasource, &ClientOptions::default())?;

        Ok(AppContext::new(cache, db, self.settings.clone()))
    }

    /// Replay the resolution through the installed subscriber.
    ///
    /// [`Bootstrap::resolve`] runs before logging is configured, so its own
    /// events go nowhere. Call this once telemetry is up.
    pub fn log_resolution(&self) {
        let report = self.env.report();
        for outcome in &report.outcomes {
            match &outcome.status {
                SourceStatus::Invalid { reason } => tracing::warn!(
                    source = %outcome.source,
                    path = ?outcome.path,
                    %reason,
                    "Env file unreadable, skipped"
                ),
                status => tracing::debug!(
                    source = %outcome.source,
                    path = ?outcome.path,
                    ?status,
                    "Env source"
                ),
            }
        }
        tracing::info!(
            keys = self.env.len(),
            found = report.found().count(),
            sources = report.outcomes.len(),
            loaded_at = %report.loaded_at,
            "Environment resolved"
        );

        if self.settings.database_url.is_placeholder() {
            tracing::warn!(
                fallback = %self.settings.database_url.redacted(),
                "DATABASE_URL not set, using build placeholder"
            );
        }
        if self.settings.redis_url.is_fallback() {
            tracing::info!(
                fallback = self.settings.redis_url.as_str(),
                "REDIS_URL not set, using default"
            );
        }
    }

    pub fn web_build_config(&self) -> WebBuildConfig {
        WebBuildConfig::for_app(self.layout.monorepo_root().join(WEB_APP_DIR))
    }

    /// Everything resolved at startup, with secrets masked
    pub fn describe(&self) -> serde_json::Value {
        json!({
            "service_dir": self.layout.service_dir(),
            "monorepo_root": self.layout.monorepo_root(),
            "sources": self.env.report(),
            "settings": self.settings.redacted(),
            "datasource": self.datasource.redacted(),
            "cache": {
                "url": basecamp_config::settings::redact_url(self.settings.redis_url.as_str()),
                "default_ttl_ms": u64::try_from(basecamp_cache::DEFAULT_TTL.as_millis())
                    .unwrap_or(u64::MAX),
            },
            "web": self.web_build_config(),
        })
    }
}
