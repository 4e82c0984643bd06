//! Student rows.

use bytes::Bytes;
use tallydb_storage::Record;

/// A student row keyed by student id, searchable by last name.
///
/// `payload` carries any further columns as opaque bytes; the store never
/// looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_id: u32,
    pub last_name: String,
    pub first_name: String,
    pub payload: Bytes,
    deleted: bool,
}

impl StudentRecord {
    /// Creates a live record with an empty payload.
    pub fn new(
        student_id: u32,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            student_id,
            last_name: last_name.into(),
            first_name: first_name.into(),
            payload: Bytes::new(),
            deleted: false,
        }
    }

    /// Attaches opaque payload bytes.
    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

impl Record for StudentRecord {
    type Key = u32;

    fn key(&self) -> &u32 {
        &self.student_id
    }

    fn secondary_key(&self) -> &str {
        &self.last_name
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }
}

impl std::fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, {}", self.student_id, self.last_name, self.first_name)?;
        if !self.payload.is_empty() {
            write!(f, " [{} bytes]", self.payload.len())?;
        }
        Ok(())
    }
}
