//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use gatehub_core::config::WorkerConfig;
use gatehub_core::error::AppError;
use gatehub_database::ApprovalStore;

use crate::executor::{TaskExecutor, TaskHandler};
use crate::tasks::ApprovalExpirySweep;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(
        &self,
        config: &WorkerConfig,
        approvals: Arc<dyn ApprovalStore>,
    ) -> Result<(), AppError> {
        let sweep = Arc::new(ApprovalExpirySweep::new(approvals));
        self.register(&config.expiry_sweep_cron, sweep).await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Run `handler` on every tick of the six-field `cron` expression
    pub async fn register(
        &self,
        cron: &str,
        handler: Arc<dyn TaskHandler>,
    ) -> Result<(), AppError> {
        let name = handler.name().to_string();
        let task = Arc::clone(&handler);
        let job = CronJob::new_async(cron, move |_uuid, _lock| {
            let task = Arc::clone(&task);
            Box::pin(async move {
                // Failures are logged by the executor; the next tick retries.
                let _ = TaskExecutor::execute(task.as_ref()).await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid schedule '{cron}' for {name}: {e}"))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {name} schedule: {e}")))?;

        tracing::info!(task = %name, schedule = %cron, "Registered scheduled task");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
