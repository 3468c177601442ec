//! # Basecamp API
//!
//! Composition root for the basecamp API service.
//!
//! ## Startup
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │        EnvLoader (process env, root/.env, svc/.env)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  LoadedEnv
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Settings + DatasourceConfig                      │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │  CacheClient (60s TTL)  │   │   DbClient (lazy pool)       │
//! └─────────────────────────┘   └──────────────────────────────┘
//!                    │                   │
//!                    └────────┬──────────┘
//!                             ▼
//!                 AppContext -> Axum router
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bootstrap;
pub mod context;
pub mod error;
pub mod telemetry;

use axum::{Router, response::IntoResponse, routing::get};
use tower_http::trace::TraceLayer;

pub use bootstrap::Bootstrap;
pub use context::{AppContext, AppContextBuilder};
pub use error::{BootstrapError, BootstrapResult};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}

/// Build the Axum router
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Basecamp API" }))
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use basecamp_cache::{CacheClient, CacheConfig, shared_cache};
    use basecamp_config::{LoadedEnv, Settings};
    use basecamp_db::client::{ClientOptions, DbClient};
    use tower::ServiceExt;

    fn context() -> AppContext {
        let env = LoadedEnv::from_pairs([("REDIS_URL", "memory://")]);
        let settings = Settings::from_env(&env).unwrap();
        let db = DbClient::connect_lazy(settings.database_url.as_str(), &ClientOptions::default())
            .unwrap();
        AppContextBuilder::new()
            .with_cache(shared_cache(CacheClient::connect(CacheConfig::memory()).unwrap()))
            .with_db(db)
            .with_settings(settings)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = build_router(context());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = build_router(context());
        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_builder_requires_every_handle() {
        let err = AppContextBuilder::new().build().unwrap_err();
        assert_eq!(err, "cache client required");
    }
}
