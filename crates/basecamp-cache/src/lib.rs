//! # Basecamp Cache
//!
//! Shared cache handle for the basecamp API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Composition root (Settings -> CacheConfig)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │       CacheClient (typed ops, 60s default TTL)              │
//! │       shared as Arc<CacheClient> with every consumer        │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │     RedisStore          │   │        MemoryStore           │
//! │  (redis://, lazy conn)  │   │   (memory://, tests/dev)     │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `redis`: Enable the Redis store (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use basecamp_cache::{CacheClient, shared_cache};
//!
//! let cache = shared_cache(CacheClient::from_settings(&settings)?);
//! cache.set_json("user:1", &user).await?; // expires after 60s
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use client::{CacheClient, SharedCacheClient, shared_cache};
pub use config::{CacheBackend, CacheConfig, DEFAULT_TTL};
pub use error::{CacheError, Result};
pub use store::{CacheStore, MemoryStore};
#[cfg(feature = "redis")]
pub use store::RedisStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
