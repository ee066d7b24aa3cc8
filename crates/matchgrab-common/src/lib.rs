//! matchgrab Common - Shared types and utilities
//!
//! Error taxonomy and service configuration used by the store crate and
//! the binaries.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
