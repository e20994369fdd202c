//! Guest approval coordination between the gate and a household.

pub mod coordinator;

pub use coordinator::{ApprovalCoordinator, ApprovalTicket, ApprovalView, GuestApprovalInput};
