//! Offline gate-log synchronization.

pub mod engine;
pub mod result;

pub use engine::SyncEngine;
pub use result::{BatchErrorDetail, SyncResult};
