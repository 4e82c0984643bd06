//! Append-only record heap.

use super::row::RowId;
use crate::record::Record;
use tallydb_common::{Result, TallyError};

/// Append-only sequence of records indexed by [`RowId`].
///
/// Slots are never removed or reordered. Deleting a record only sets its
/// deleted flag, so a deleted record stays readable through [`get`](Self::get).
#[derive(Debug, Clone)]
pub struct RecordHeap<R> {
    rows: Vec<R>,
    live: usize,
}

impl<R: Record> RecordHeap<R> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a heap with room for `capacity` records before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Appends a record and returns its new row id.
    pub fn append(&mut self, record: R) -> RowId {
        let row = RowId::new(self.rows.len() as u64);
        if !record.is_deleted() {
            self.live += 1;
        }
        self.rows.push(record);
        row
    }

    /// Record stored at `row`, live or deleted.
    pub fn get(&self, row: RowId) -> Option<&R> {
        self.rows.get(row.slot()?)
    }

    /// Record at `row` if it has not been deleted.
    pub fn get_live(&self, row: RowId) -> Option<&R> {
        self.get(row).filter(|record| !record.is_deleted())
    }

    /// Sets the deleted flag on `row` and returns the record.
    /// Marking an already deleted record is allowed and changes nothing.
    pub fn mark_deleted(&mut self, row: RowId) -> Result<&R> {
        let record = row
            .slot()
            .and_then(|slot| self.rows.get_mut(slot))
            .ok_or(TallyError::RowNotFound {
                row_id: row.as_u64(),
            })?;
        if !record.is_deleted() {
            record.set_deleted(true);
            self.live -= 1;
        }
        Ok(record)
    }

    /// Total slots, including deleted records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of records not marked deleted.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// All slots in append order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &R)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(slot, record)| (RowId::new(slot as u64), record))
    }
}

impl<R: Record> Default for RecordHeap<R> {
    fn default() -> Self {
        Self::new()
    }
}
