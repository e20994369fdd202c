//! Guest approval domain entities.

pub mod model;
pub mod status;

pub use model::{CreateApprovalRequest, GuestApprovalRequest};
pub use status::{ApprovalDecision, ApprovalStatus};
