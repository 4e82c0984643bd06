//! Student catalog: request translation over a record store.

use crate::outcome::QueryOutcome;
use crate::student::StudentRecord;
use tallydb_common::{Result, StoreConfig, TallyError};
use tallydb_storage::{RecordStore, RowId};
use tracing::{debug, info};

/// A read request against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Single student by id.
    ById(u32),
    /// Students with `lo <= id <= hi`.
    IdRange { lo: u32, hi: u32 },
    /// Students whose last name starts with the prefix, ignoring case.
    LastNamePrefix(String),
}

/// Student records indexed by id and by last name.
#[derive(Debug, Default)]
pub struct Catalog {
    store: RecordStore<StudentRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            store: RecordStore::with_config(config),
        }
    }

    /// Loads records in order. Later records replace earlier ones with the
    /// same student id.
    pub fn load<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = StudentRecord>,
    {
        let rows = self.store.insert_all(records);
        info!(
            loaded = rows.len(),
            live = self.store.len_live(),
            "loaded student records"
        );
        rows.len()
    }

    /// Inserts or replaces a student.
    pub fn insert(&mut self, record: StudentRecord) -> RowId {
        self.store.insert_record(record)
    }

    /// Deletes a student. Returns false when no such student is live.
    pub fn delete(&mut self, student_id: u32) -> bool {
        self.store.delete_by_id(&student_id)
    }

    pub fn find_by_id(&self, student_id: u32) -> QueryOutcome<'_> {
        let lookup = self.store.find_by_id(&student_id);
        QueryOutcome::new(lookup.record.into_iter().collect(), lookup.comparisons)
    }

    /// Students in the closed id range. An inverted range matches nothing.
    pub fn range_by_id(&self, lo: u32, hi: u32) -> QueryOutcome<'_> {
        let scan = self.store.range_by_id(&lo, &hi);
        QueryOutcome::new(scan.records, scan.comparisons)
    }

    pub fn prefix_by_last_name(&self, prefix: &str) -> QueryOutcome<'_> {
        let scan = self.store.prefix_by_secondary(prefix);
        QueryOutcome::new(scan.records, scan.comparisons)
    }

    /// Runs a request. Unlike [`range_by_id`](Self::range_by_id), an
    /// inverted id range is rejected as a malformed request.
    pub fn execute(&self, query: &Query) -> Result<QueryOutcome<'_>> {
        let outcome = match query {
            Query::ById(id) => self.find_by_id(*id),
            Query::IdRange { lo, hi } => {
                if lo > hi {
                    return Err(TallyError::InvalidRange {
                        lo: lo.to_string(),
                        hi: hi.to_string(),
                    });
                }
                self.range_by_id(*lo, *hi)
            }
            Query::LastNamePrefix(prefix) => self.prefix_by_last_name(prefix),
        };
        debug!(
            ?query,
            matched = outcome.records.len(),
            comparisons = outcome.comparisons,
            "executed query"
        );
        Ok(outcome)
    }

    /// Number of live students.
    pub fn len(&self) -> usize {
        self.store.len_live()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying record store.
    pub fn store(&self) -> &RecordStore<StudentRecord> {
        &self.store
    }
}
