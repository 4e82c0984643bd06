//! Record contract consumed by the store.

use std::fmt::Debug;

/// A row the store can index.
///
/// The store reads the identifying key and the secondary key, and flips the
/// deleted flag. Everything else in the implementing type is opaque payload.
/// Keys must not change once a record has been inserted.
pub trait Record {
    /// Unique identifying key.
    type Key: Ord + Clone + Debug;

    fn key(&self) -> &Self::Key;

    /// Non-unique secondary key, indexed after normalization.
    fn secondary_key(&self) -> &str;

    fn is_deleted(&self) -> bool;

    fn set_deleted(&mut self, deleted: bool);
}
