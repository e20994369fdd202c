//! Guest approval configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest decision window accepted from configuration (one day).
pub const MAX_APPROVAL_TIMEOUT_SECONDS: u64 = 86_400;

/// Time-box settings for guest approval requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalConfig {
    /// Seconds a household has to answer before the request expires.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ApprovalConfig {
    /// Check that the timeout window is usable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "approval.timeout_seconds must be greater than 0",
            ));
        }
        if self.timeout_seconds > MAX_APPROVAL_TIMEOUT_SECONDS {
            return Err(AppError::configuration(format!(
                "approval.timeout_seconds must be at most {MAX_APPROVAL_TIMEOUT_SECONDS}, got {}",
                self.timeout_seconds
            )));
        }
        Ok(())
    }
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    120
}
