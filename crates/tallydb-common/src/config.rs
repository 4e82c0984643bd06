//! Configuration structures for TallyDB.

use serde::{Deserialize, Serialize};

/// Configuration for a record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// How secondary keys are case-folded before indexing and lookup.
    pub case_fold: CaseFoldMode,
    /// Number of heap slots reserved up front (0 = no reservation).
    pub initial_heap_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            case_fold: CaseFoldMode::Unicode,
            initial_heap_capacity: 1024,
        }
    }
}

/// Case normalization applied to secondary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseFoldMode {
    /// Full Unicode lowercase mapping.
    #[default]
    Unicode,
    /// Lowercase ASCII letters only, other characters pass through.
    Ascii,
    /// No folding; lookups are case-sensitive.
    Exact,
}
