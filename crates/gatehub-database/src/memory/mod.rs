//! Process-local store implementations.
//!
//! Used when `database.provider = "memory"` and by tests. They enforce the
//! same tenant filters and natural-key uniqueness as the PostgreSQL schema.

pub mod approval;
pub mod gate_log;
pub mod profile;

pub use approval::InMemoryApprovalStore;
pub use gate_log::InMemoryGateLogStore;
pub use profile::InMemoryProfileStore;
