//! Query results.

use crate::student::StudentRecord;
use std::fmt;

/// Records matched by a query and the index comparisons it took.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome<'a> {
    pub records: Vec<&'a StudentRecord>,
    pub comparisons: u64,
}

impl<'a> QueryOutcome<'a> {
    pub fn new(records: Vec<&'a StudentRecord>, comparisons: u64) -> Self {
        Self {
            records,
            comparisons,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Student ids in result order.
    pub fn student_ids(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.student_id).collect()
    }
}

/// One line per record, then the comparison count.
impl fmt::Display for QueryOutcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            writeln!(f, "no records")?;
        }
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        write!(f, "comparisons: {}", self.comparisons)
    }
}
