//! TallyDB common types, errors, and configuration.
//!
//! This crate provides shared definitions used across all TallyDB components.

pub mod config;
pub mod error;

pub use config::{CaseFoldMode, StoreConfig};
pub use error::{Result, TallyError};
