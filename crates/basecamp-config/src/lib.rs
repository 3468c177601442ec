//! # Basecamp Configuration
//!
//! Startup configuration for the basecamp monorepo services.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  ┌────────────────────┐  ┌──────────────────┐  ┌──────────────┐
//! │ process env  │  │ <root>/.env        │  │ <service>/.env   │  │ default .env │
//! └──────┬───────┘  └─────────┬──────────┘  └────────┬─────────┘  └──────┬───────┘
//!        └──────────── first source to define a key wins ───────────────┘
//!                                    │
//!                                    ▼
//!                       ┌──────────────────────────┐
//!                       │ LoadedEnv + LoadReport   │
//!                       └────────────┬─────────────┘
//!                                    ▼
//!                 ┌──────────────────────────────────────┐
//!                 │ Settings / DatasourceConfig          │
//!                 │ (fallbacks for DATABASE_URL,         │
//!                 │  REDIS_URL)                          │
//!                 └──────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use basecamp_config::{EnvLoader, Settings};
//!
//! let env = EnvLoader::from_current_dir()?.load();
//! let settings = Settings::from_env(&env)?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod datasource;
pub mod error;
pub mod layout;
pub mod loader;
pub mod settings;
pub mod web;

pub use datasource::DatasourceConfig;
pub use error::{ConfigError, Result};
pub use layout::Layout;
pub use loader::{EnvLoader, EnvSource, LoadReport, LoadedEnv, SourceOutcome, SourceStatus};
pub use settings::{
    DatabaseUrl, FALLBACK_DATABASE_URL, FALLBACK_REDIS_URL, ResolvedValue, Settings, ValueOrigin,
};
pub use web::{OutputMode, WebBuildConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
