//! Caller identity resolution.

pub mod resolver;

pub use resolver::{CallerIdentity, ProfileResolver};
