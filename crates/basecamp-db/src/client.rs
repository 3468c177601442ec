//! Stable import path for the generated data-access client.
//!
//! Everything the generator emits is forwarded unchanged. Import from here
//! so a change of generation output location only touches this file.

pub use crate::generated::*;
