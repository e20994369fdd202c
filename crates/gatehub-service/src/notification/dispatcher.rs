//! Notification dispatcher trait and the no-op implementation.

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::debug;

use gatehub_core::result::AppResult;
use gatehub_entity::approval::GuestApprovalRequest;

/// Pushes a guest-arrival notice to the devices of a household.
///
/// Delivery is best effort. Callers log failures and carry on.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync + Debug + 'static {
    /// Notify the request's household. Returns whether a notice was handed
    /// to a delivery channel.
    async fn notify_guest_arrival(&self, request: &GuestApprovalRequest) -> AppResult<bool>;
}

/// Dispatcher used when no delivery channel is configured.
#[derive(Debug, Clone, Default)]
pub struct NoopDispatcher;

#[async_trait]
impl NotificationDispatcher for NoopDispatcher {
    async fn notify_guest_arrival(&self, request: &GuestApprovalRequest) -> AppResult<bool> {
        debug!(
            approval_request_id = %request.id,
            household_id = %request.household_id,
            "No notification channel configured, skipping dispatch"
        );
        Ok(false)
    }
}
