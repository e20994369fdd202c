//! # gatehub-database
//!
//! Store traits consumed by the service layer, their PostgreSQL
//! implementations, and process-local in-memory implementations used for
//! development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{ApprovalStore, GateLogStore, ProfileStore};
