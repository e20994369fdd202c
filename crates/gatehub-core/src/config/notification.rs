//! Household notification dispatch configuration.

use serde::{Deserialize, Serialize};

/// Push notification webhook settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Endpoint receiving push payloads. Dispatch is disabled when unset.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Bearer token sent with each webhook call.
    #[serde(default)]
    pub webhook_token: Option<String>,
    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            webhook_token: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    3000
}
