//! Core type definitions used across the GateHub workspace.

pub mod id;

pub use id::*;
