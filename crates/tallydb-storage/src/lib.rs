//! Storage engine for TallyDB.
//!
//! This crate provides:
//! - An unbalanced ordered index with a per-operation comparison counter
//! - An append-only record heap addressed by stable row ids
//! - Secondary key normalization
//! - A record store keeping a unique and a non-unique index consistent

mod heap;
mod index;
mod normalize;
mod record;
mod store;

pub use heap::{RecordHeap, RowId};
pub use index::{Iter, OrderedIndex};
pub use normalize::{KeyNormalizer, NormalizeFn, prefix_bounds};
pub use record::Record;
pub use store::{Lookup, RecordStore, Scan};
