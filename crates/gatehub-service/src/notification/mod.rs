//! Household notification dispatch for guest arrivals.

pub mod dispatcher;
pub mod webhook;

pub use dispatcher::{NoopDispatcher, NotificationDispatcher};
pub use webhook::WebhookDispatcher;
