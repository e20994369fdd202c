//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehub_core::types::{ApprovalRequestId, GateId, HouseholdId, UserId};
use gatehub_entity::approval::ApprovalStatus;
use gatehub_service::approval::{ApprovalTicket, ApprovalView};
use gatehub_service::sync::{BatchErrorDetail, SyncResult};

/// Result of a gate log sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    /// True when no record failed.
    pub success: bool,
    /// Records received.
    pub total: usize,
    /// Records stored.
    pub inserted: usize,
    /// Records already known.
    pub duplicates: usize,
    /// Records in failed batches.
    pub errors: usize,
    /// One sample per failed batch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_details: Vec<BatchErrorDetail>,
}

impl From<SyncResult> for SyncResponse {
    fn from(result: SyncResult) -> Self {
        Self {
            success: result.is_success(),
            total: result.total,
            inserted: result.inserted,
            duplicates: result.duplicates,
            errors: result.errors,
            error_details: result.error_details,
        }
    }
}

/// Acknowledgement of a new guest approval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalCreatedResponse {
    /// New request id.
    pub approval_request_id: ApprovalRequestId,
    /// Always `pending`.
    pub status: ApprovalStatus,
    /// Length of the decision window.
    pub timeout_seconds: u64,
    /// Decision deadline.
    pub timeout_at: DateTime<Utc>,
    /// Whether the household was notified.
    pub notification_sent: bool,
}

impl From<ApprovalTicket> for ApprovalCreatedResponse {
    fn from(ticket: ApprovalTicket) -> Self {
        Self {
            approval_request_id: ticket.request.id,
            status: ticket.request.status,
            timeout_seconds: ticket.timeout_seconds,
            timeout_at: ticket.request.timeout_at,
            notification_sent: ticket.notification_sent,
        }
    }
}

/// Current state of a guest approval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalStatusResponse {
    /// Request id.
    pub approval_request_id: ApprovalRequestId,
    /// Household asked to decide.
    pub household_id: HouseholdId,
    /// Guest name.
    pub guest_name: String,
    /// Guest vehicle plate.
    pub vehicle_plate: Option<String>,
    /// Gate the guest is waiting at.
    pub gate_id: GateId,
    /// Status with deadline expiry applied.
    pub status: ApprovalStatus,
    /// Seconds left to decide.
    pub seconds_remaining: i64,
    /// When the request was raised.
    pub created_at: DateTime<Utc>,
    /// Decision deadline.
    pub timeout_at: DateTime<Utc>,
    /// Who answered.
    pub responded_by: Option<UserId>,
    /// When they answered.
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<ApprovalView> for ApprovalStatusResponse {
    fn from(view: ApprovalView) -> Self {
        let request = view.request;
        Self {
            approval_request_id: request.id,
            household_id: request.household_id,
            guest_name: request.guest_name,
            vehicle_plate: request.vehicle_plate,
            gate_id: request.gate_id,
            status: view.status,
            seconds_remaining: view.seconds_remaining,
            created_at: request.created_at,
            timeout_at: request.timeout_at,
            responded_by: request.responded_by,
            responded_at: request.responded_at,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Readiness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// `ready` when every dependency answered.
    pub status: String,
    /// Store backend in use.
    pub database: String,
}
