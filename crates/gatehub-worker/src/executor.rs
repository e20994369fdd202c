//! Task executor: runs a handler and records how it went.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use gatehub_core::error::AppError;

/// A unit of scheduled maintenance work.
#[async_trait]
pub trait TaskHandler: Send + Sync + std::fmt::Debug {
    /// Stable task name used in logs.
    fn name(&self) -> &str;

    /// Run the task once and return a summary.
    async fn run(&self) -> Result<Value, TaskError>;
}

/// Error from a task run
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Transient failure; the next scheduled run may succeed
    #[error("Transient task failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Runs task handlers with uniform logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskExecutor;

impl TaskExecutor {
    /// Run `handler` once, logging the summary or the failure.
    pub async fn execute(handler: &dyn TaskHandler) -> Result<Value, TaskError> {
        let started = Instant::now();
        let outcome = handler.run().await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(summary) => tracing::debug!(
                task = handler.name(),
                duration_ms,
                summary = %summary,
                "Task completed"
            ),
            Err(e) => tracing::error!(
                task = handler.name(),
                duration_ms,
                error = %e,
                "Task failed"
            ),
        }

        outcome
    }
}
