//! # Basecamp Database Client
//!
//! The data-access client is produced by a generator into `generated/`.
//! That location is private: consumers import from [`client`], which
//! forwards every generated symbol under the same name.
//!
//! ```rust,ignore
//! use basecamp_db::client::{ClientOptions, DbClient};
//!
//! let db = basecamp_db::datasource::connect_lazy(&datasource, &ClientOptions::default())?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod generated;

pub mod client;
pub mod datasource;
pub mod error;

pub use client::*;
pub use error::{DbError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    #[test]
    fn test_client_forwards_generated_symbols() {
        assert_eq!(
            TypeId::of::<client::DbClient>(),
            TypeId::of::<generated::DbClient>()
        );
        assert_eq!(
            TypeId::of::<client::ClientOptions>(),
            TypeId::of::<generated::ClientOptions>()
        );
        assert_eq!(
            TypeId::of::<client::ClientError>(),
            TypeId::of::<generated::ClientError>()
        );
        assert_eq!(
            TypeId::of::<client::ClientResult<()>>(),
            TypeId::of::<generated::ClientResult<()>>()
        );
        assert_eq!(client::GENERATOR_VERSION, generated::GENERATOR_VERSION);
    }

    #[test]
    fn test_crate_root_forwards_client() {
        assert_eq!(TypeId::of::<DbClient>(), TypeId::of::<client::DbClient>());
        assert_eq!(ClientOptions::default(), client::ClientOptions::default());
    }
}
