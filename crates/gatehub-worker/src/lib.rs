//! Scheduled maintenance tasks for GateHub.
//!
//! This crate provides:
//! - A task executor that runs a handler and logs its outcome
//! - A cron scheduler that fires registered tasks
//! - The approval expiry sweep

pub mod executor;
pub mod scheduler;
pub mod tasks;

pub use executor::{TaskError, TaskExecutor, TaskHandler};
pub use scheduler::CronScheduler;
pub use tasks::ApprovalExpirySweep;
