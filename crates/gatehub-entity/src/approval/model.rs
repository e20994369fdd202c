//! Guest approval request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatehub_core::types::{ApprovalRequestId, GateId, HouseholdId, TenantId, UserId};

use super::status::ApprovalStatus;

/// A time-boxed request asking a household to admit a guest.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GuestApprovalRequest {
    /// Unique request identifier.
    pub id: ApprovalRequestId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Household asked to decide.
    pub household_id: HouseholdId,
    /// Name given by the guest at the gate.
    pub guest_name: String,
    /// Guest vehicle plate.
    pub vehicle_plate: Option<String>,
    /// Gate the guest is waiting at.
    pub gate_id: GateId,
    /// Guard who raised the request.
    pub guard_id: UserId,
    /// Stored status. See [`Self::effective_status`] for the read-time view.
    pub status: ApprovalStatus,
    /// Household member who answered.
    pub responded_by: Option<UserId>,
    /// When the household answered.
    pub responded_at: Option<DateTime<Utc>>,
    /// When the request was raised.
    pub created_at: DateTime<Utc>,
    /// Deadline after which the request is expired.
    pub timeout_at: DateTime<Utc>,
}

impl GuestApprovalRequest {
    /// Whether the deadline has passed at `now`.
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        now > self.timeout_at
    }

    /// Status as observed at `now`: a pending request past its deadline is expired.
    pub fn effective_status(&self, now: DateTime<Utc>) -> ApprovalStatus {
        if self.status == ApprovalStatus::Pending && self.is_past_deadline(now) {
            ApprovalStatus::Expired
        } else {
            self.status
        }
    }

    /// Whole seconds left before the deadline (0 once passed or resolved).
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        if self.effective_status(now) != ApprovalStatus::Pending {
            return 0;
        }
        (self.timeout_at - now).num_seconds().max(0)
    }
}

/// Data required to create a new approval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApprovalRequest {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Household asked to decide.
    pub household_id: HouseholdId,
    /// Guest name.
    pub guest_name: String,
    /// Guest vehicle plate.
    pub vehicle_plate: Option<String>,
    /// Gate the guest is waiting at.
    pub gate_id: GateId,
    /// Guard raising the request.
    pub guard_id: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Fixed deadline.
    pub timeout_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(status: ApprovalStatus, now: DateTime<Utc>) -> GuestApprovalRequest {
        GuestApprovalRequest {
            id: ApprovalRequestId::new(),
            tenant_id: TenantId::new(),
            household_id: HouseholdId::new(),
            guest_name: "Juan Dela Cruz".to_string(),
            vehicle_plate: None,
            gate_id: GateId::new(),
            guard_id: UserId::new(),
            status,
            responded_by: None,
            responded_at: None,
            created_at: now,
            timeout_at: now + Duration::seconds(120),
        }
    }

    #[test]
    fn test_pending_before_deadline() {
        let now = Utc::now();
        let req = request(ApprovalStatus::Pending, now);
        assert_eq!(req.effective_status(now + Duration::seconds(60)), ApprovalStatus::Pending);
        assert_eq!(req.seconds_remaining(now + Duration::seconds(60)), 60);
    }

    #[test]
    fn test_pending_past_deadline_reads_as_expired() {
        let now = Utc::now();
        let req = request(ApprovalStatus::Pending, now);
        let later = now + Duration::seconds(121);
        assert_eq!(req.effective_status(later), ApprovalStatus::Expired);
        assert_eq!(req.seconds_remaining(later), 0);
    }

    #[test]
    fn test_resolved_request_keeps_its_status_after_deadline() {
        let now = Utc::now();
        let req = request(ApprovalStatus::Approved, now);
        assert_eq!(
            req.effective_status(now + Duration::seconds(600)),
            ApprovalStatus::Approved
        );
    }
}
