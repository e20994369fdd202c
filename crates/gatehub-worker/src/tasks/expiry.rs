//! Marks overdue pending approval requests as expired.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing;

use gatehub_database::ApprovalStore;

use crate::executor::{TaskError, TaskHandler};

/// Persists the expiry that reads already derive from `timeout_at`.
///
/// Only touches rows still pending past their deadline, so repeated or
/// overlapping runs are harmless.
#[derive(Debug)]
pub struct ApprovalExpirySweep {
    /// Approval request store
    approvals: Arc<dyn ApprovalStore>,
}

impl ApprovalExpirySweep {
    /// Create a new expiry sweep
    pub fn new(approvals: Arc<dyn ApprovalStore>) -> Self {
        Self { approvals }
    }
}

#[async_trait]
impl TaskHandler for ApprovalExpirySweep {
    fn name(&self) -> &str {
        "approval_expiry_sweep"
    }

    async fn run(&self) -> Result<Value, TaskError> {
        let expired = self
            .approvals
            .expire_overdue(Utc::now())
            .await
            .map_err(|e| TaskError::Transient(format!("Expiry sweep failed: {e}")))?;

        if expired > 0 {
            tracing::info!(expired, "Expired overdue guest approval requests");
        }

        Ok(serde_json::json!({
            "task": self.name(),
            "expired": expired,
        }))
    }
}
