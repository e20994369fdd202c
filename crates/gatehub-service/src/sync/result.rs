//! Aggregate outcome of a sync call.

use serde::{Deserialize, Serialize};

use gatehub_entity::gate_log::NewEntryExitLog;

/// A batch the store rejected, with one of its records as a sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchErrorDetail {
    /// Representative record from the failed batch.
    pub log: NewEntryExitLog,
    /// Store error message.
    pub error: String,
}

/// Counts accumulated over every batch of one sync call.
///
/// `inserted + duplicates + errors == total` always holds once the call
/// returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncResult {
    /// Records received.
    pub total: usize,
    /// Records written to the store.
    pub inserted: usize,
    /// Records already stored or repeated within the submission.
    pub duplicates: usize,
    /// Records in batches the store failed to write.
    pub errors: usize,
    /// One entry per failed batch.
    pub error_details: Vec<BatchErrorDetail>,
}

impl SyncResult {
    /// An empty result expecting `total` records.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Whether every record was either inserted or recognised as a duplicate.
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    /// Whether the per-record counts add up to the total.
    pub fn is_balanced(&self) -> bool {
        self.inserted + self.duplicates + self.errors == self.total
    }
}
