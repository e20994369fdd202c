//! # gatehub-service
//!
//! Business logic for GateHub. Services take the authenticated caller as a
//! [`RequestContext`] and reach storage only through the store traits of
//! `gatehub-database`.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod approval;
pub mod context;
pub mod notification;
pub mod sync;

pub use approval::{ApprovalCoordinator, ApprovalTicket, ApprovalView, GuestApprovalInput};
pub use context::RequestContext;
pub use notification::{NoopDispatcher, NotificationDispatcher, WebhookDispatcher};
pub use sync::{BatchErrorDetail, SyncEngine, SyncResult};
