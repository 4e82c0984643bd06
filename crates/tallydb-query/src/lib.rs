//! Query layer for TallyDB.
//!
//! This crate provides:
//! - StudentRecord, the concrete row type stored in a catalog
//! - Catalog, which translates by-id, id-range, and last-name-prefix
//!   requests into record store calls
//! - QueryOutcome, the records a request matched plus its comparison count

mod catalog;
mod outcome;
mod student;

pub use catalog::{Catalog, Query};
pub use outcome::QueryOutcome;
pub use student::StudentRecord;
