//! Built-in maintenance tasks.

pub mod expiry;

pub use expiry::ApprovalExpirySweep;
