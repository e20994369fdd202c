//! HTTP request handlers.

pub mod approval;
pub mod health;
pub mod sync;
