//! Record store with a unique and a secondary index.
//!
//! ```text
//! unique:    key ──────────────► RowId ─┐
//!                                       ├──► heap[RowId] (append-only)
//! secondary: fold(secondary) ──► [RowId, ...] ─┘
//! ```
//!
//! Updates never rewrite a heap slot. Inserting a key that already exists
//! marks the old slot deleted, unlinks it from both indexes, and appends the
//! new record. Queries still skip deleted slots when reading the heap.

use crate::heap::{RecordHeap, RowId};
use crate::index::OrderedIndex;
use crate::normalize::{KeyNormalizer, prefix_bounds};
use crate::record::Record;
use tallydb_common::{CaseFoldMode, StoreConfig};
use tracing::{debug, trace};

/// Result of a point lookup.
#[derive(Debug)]
pub struct Lookup<'a, R> {
    /// The live record, or `None` when the key is absent.
    pub record: Option<&'a R>,
    /// Key comparisons made by the index during the lookup.
    pub comparisons: u64,
}

impl<R> Lookup<'_, R> {
    pub fn found(&self) -> bool {
        self.record.is_some()
    }
}

/// Result of a range or prefix scan.
#[derive(Debug)]
pub struct Scan<'a, R> {
    /// Live records in index order.
    pub records: Vec<&'a R>,
    /// Key comparisons made while navigating the index. Filtering of
    /// deleted rows is not counted.
    pub comparisons: u64,
}

impl<R> Scan<'_, R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// In-memory record store.
///
/// Not synchronized. Every mutation touches the heap and both indexes, so
/// callers sharing a store across threads must guard all three together.
#[derive(Debug)]
pub struct RecordStore<R: Record, N = CaseFoldMode> {
    heap: RecordHeap<R>,
    unique: OrderedIndex<R::Key, RowId>,
    secondary: OrderedIndex<String, Vec<RowId>>,
    normalizer: N,
}

impl<R: Record> RecordStore<R> {
    /// Creates a store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Creates a store from a configuration.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self::build(config.case_fold, config.initial_heap_capacity)
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, N: KeyNormalizer> RecordStore<R, N> {
    /// Creates a store using a custom secondary key normalizer.
    pub fn with_normalizer(normalizer: N) -> Self {
        Self::build(normalizer, 0)
    }

    fn build(normalizer: N, capacity: usize) -> Self {
        Self {
            heap: RecordHeap::with_capacity(capacity),
            unique: OrderedIndex::new(),
            secondary: OrderedIndex::new(),
            normalizer,
        }
    }

    /// Inserts a record, replacing any live record with the same key.
    ///
    /// Returns the row id of the newly appended slot, which is the slot the
    /// unique index points at afterwards. The record is stored live even if
    /// its deleted flag was set by the caller.
    pub fn insert_record(&mut self, mut record: R) -> RowId {
        record.set_deleted(false);
        let key = record.key().clone();
        let secondary = self.normalizer.normalize(record.secondary_key());

        let previous = self.unique.erase(&key);
        if let Some(stale) = previous {
            self.retire(stale);
        }

        let row = self.heap.append(record);
        self.unique.insert(key.clone(), row);
        self.link_secondary(row, secondary);

        debug!(
            key = ?key,
            row = %row,
            replaced = ?previous.map(|stale| stale.as_u64()),
            "inserted record"
        );
        row
    }

    /// Inserts every record in order, returning their row ids.
    pub fn insert_all<I>(&mut self, records: I) -> Vec<RowId>
    where
        I: IntoIterator<Item = R>,
    {
        records
            .into_iter()
            .map(|record| self.insert_record(record))
            .collect()
    }

    /// Logically deletes the live record for `id`.
    ///
    /// Returns `false` without touching anything when no live record has
    /// that key, so a repeated delete reports `false`.
    pub fn delete_by_id(&mut self, id: &R::Key) -> bool {
        let Some(row) = self.unique.erase(id) else {
            debug!(key = ?id, "delete found no live record");
            return false;
        };
        self.retire(row);
        debug!(key = ?id, row = %row, "deleted record");
        true
    }

    /// Point lookup by identifying key.
    pub fn find_by_id(&self, id: &R::Key) -> Lookup<'_, R> {
        self.unique.reset_metrics();
        let record = self
            .unique
            .get(id)
            .and_then(|row| self.heap.get_live(*row));
        let comparisons = self.unique.comparisons();
        debug!(key = ?id, found = record.is_some(), comparisons, "find by id");
        Lookup {
            record,
            comparisons,
        }
    }

    /// Live records with `lo <= key <= hi`, ascending by key.
    pub fn range_by_id(&self, lo: &R::Key, hi: &R::Key) -> Scan<'_, R> {
        self.unique.reset_metrics();
        let mut records = Vec::new();
        self.unique.range_apply(lo, hi, |_, row| {
            if let Some(record) = self.heap.get_live(*row) {
                records.push(record);
            }
        });
        let comparisons = self.unique.comparisons();
        debug!(lo = ?lo, hi = ?hi, hits = records.len(), comparisons, "range by id");
        Scan {
            records,
            comparisons,
        }
    }

    /// Live records whose normalized secondary key starts with the
    /// normalized `prefix`. Ordered by secondary key, then by insertion.
    /// An empty prefix matches every live record.
    pub fn prefix_by_secondary(&self, prefix: &str) -> Scan<'_, R> {
        let (lower, upper) = prefix_bounds(&self.normalizer, prefix);
        self.secondary.reset_metrics();
        let mut records = Vec::new();
        let collect = |key: &String, rows: &Vec<RowId>| {
            // The successor bound is inclusive in the scan but never a match.
            if key.starts_with(lower.as_str()) {
                records.extend(rows.iter().filter_map(|row| self.heap.get_live(*row)));
            }
        };
        match &upper {
            Some(upper) => self
                .secondary
                .range_apply(lower.as_str(), upper.as_str(), collect),
            None => self.secondary.range_from_apply(lower.as_str(), collect),
        }
        let comparisons = self.secondary.comparisons();
        debug!(prefix, hits = records.len(), comparisons, "prefix by secondary key");
        Scan {
            records,
            comparisons,
        }
    }

    /// Record at `row`, including deleted ones.
    pub fn get_row(&self, row: RowId) -> Option<&R> {
        self.heap.get(row)
    }

    /// The backing heap.
    pub fn heap(&self) -> &RecordHeap<R> {
        &self.heap
    }

    /// Number of live records.
    pub fn len_live(&self) -> usize {
        self.heap.live_count()
    }

    /// Number of distinct keys in the unique index.
    pub fn unique_len(&self) -> usize {
        self.unique.len()
    }

    /// Height of the unique index tree.
    pub fn unique_height(&self) -> usize {
        self.unique.height()
    }

    /// Marks a superseded or deleted slot and drops it from its secondary list.
    fn retire(&mut self, row: RowId) {
        let secondary = match self.heap.mark_deleted(row) {
            Ok(record) => self.normalizer.normalize(record.secondary_key()),
            Err(err) => unreachable!("unique index points outside the heap: {err}"),
        };
        if let Some(rows) = self.secondary.find(secondary.as_str()) {
            rows.retain(|candidate| *candidate != row);
            trace!(key = %secondary, row = %row, remaining = rows.len(), "unlinked secondary entry");
        }
    }

    fn link_secondary(&mut self, row: RowId, secondary: String) {
        match self.secondary.find(secondary.as_str()) {
            Some(rows) => rows.push(row),
            None => {
                trace!(key = %secondary, row = %row, "new secondary key");
                self.secondary.insert(secondary, vec![row]);
            }
        }
    }
}
