//! Offline log sync configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Hard per-call insertion limit of the underlying store.
pub const STORE_INSERT_CEILING: usize = 1000;

/// Batch ingestion settings for gate-device log uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Number of records inserted per store operation.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Maximum number of records accepted in one sync call.
    #[serde(default = "default_max_logs_per_request")]
    pub max_logs_per_request: usize,
}

impl SyncConfig {
    /// Check that the batch size stays within the store's ceiling.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.batch_size == 0 || self.batch_size > STORE_INSERT_CEILING {
            return Err(AppError::configuration(format!(
                "sync.batch_size must be between 1 and {STORE_INSERT_CEILING}, got {}",
                self.batch_size
            )));
        }
        if self.max_logs_per_request == 0 {
            return Err(AppError::configuration(
                "sync.max_logs_per_request must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_logs_per_request: default_max_logs_per_request(),
        }
    }
}

fn default_batch_size() -> usize {
    500
}

fn default_max_logs_per_request() -> usize {
    50_000
}
