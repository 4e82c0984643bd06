//! Error types for TallyDB.
//!
//! Lookups on absent keys are not errors: the store reports them as empty
//! results. The variants here cover heap addressing and request validation
//! in the query layer.

use thiserror::Error;

/// Result type alias using TallyError.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Errors that can occur in TallyDB operations.
#[derive(Debug, Error)]
pub enum TallyError {
    // Heap errors
    #[error("Row not found: {row_id}")]
    RowNotFound { row_id: u64 },

    // Query errors
    #[error("Invalid range: lower bound {lo} is greater than upper bound {hi}")]
    InvalidRange { lo: String, hi: String },
}
