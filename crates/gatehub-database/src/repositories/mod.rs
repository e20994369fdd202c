//! PostgreSQL repository implementations.

pub mod approval;
pub mod gate_log;
pub mod profile;

pub use approval::ApprovalRepository;
pub use gate_log::GateLogRepository;
pub use profile::ProfileRepository;
