//! Heap storage implementation.
//!
//! This module provides the append-only record heap:
//! - RowId: stable handle for a heap slot
//! - RecordHeap: slot sequence with logical delete

mod record_heap;
mod row;

pub use record_heap::RecordHeap;
pub use row::RowId;
