//! Row identifiers.

/// Position of a record in the heap.
///
/// Assigned in append order and never reused, so a RowId stays valid for
/// the lifetime of the heap regardless of later inserts or deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(u64);

impl RowId {
    /// Creates a row id from a raw slot number.
    pub const fn new(slot: u64) -> Self {
        Self(slot)
    }

    /// Raw slot number.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[inline]
    pub(crate) fn slot(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
