//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance task configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether scheduled tasks run in this process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (with seconds) for the approval expiry sweep.
    #[serde(default = "default_expiry_sweep_cron")]
    pub expiry_sweep_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            expiry_sweep_cron: default_expiry_sweep_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_expiry_sweep_cron() -> String {
    "*/30 * * * * *".to_string()
}
