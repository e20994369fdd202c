//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use gatehub_core::error::AppError;
use gatehub_core::types::{GateId, HouseholdId};
use gatehub_entity::approval::ApprovalDecision;
use gatehub_entity::gate_log::GateLogSubmission;
use gatehub_service::approval::GuestApprovalInput;

/// Body of `POST /api/gate-logs/sync`.
///
/// Carries no tenant field; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncLogsRequest {
    /// Records captured while the device was offline.
    #[serde(default)]
    pub logs: Vec<GateLogSubmission>,
}

/// Body of `POST /api/guest-approvals`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGuestApprovalRequest {
    /// Household the guest is visiting.
    #[validate(required(message = "household_id is required"))]
    pub household_id: Option<HouseholdId>,
    /// Guest name.
    #[validate(
        required(message = "guest_name is required"),
        length(min = 1, max = 200, message = "guest_name must be 1-200 characters")
    )]
    pub guest_name: Option<String>,
    /// Guest vehicle plate.
    #[validate(length(max = 20, message = "vehicle_plate must be at most 20 characters"))]
    pub vehicle_plate: Option<String>,
    /// Gate the guest is waiting at.
    #[validate(required(message = "gate_id is required"))]
    pub gate_id: Option<GateId>,
}

impl CreateGuestApprovalRequest {
    /// Converts a validated body into service input.
    pub fn into_input(self) -> Result<GuestApprovalInput, AppError> {
        Ok(GuestApprovalInput {
            household_id: self
                .household_id
                .ok_or_else(|| AppError::validation("household_id is required"))?,
            guest_name: self
                .guest_name
                .ok_or_else(|| AppError::validation("guest_name is required"))?,
            vehicle_plate: self.vehicle_plate,
            gate_id: self
                .gate_id
                .ok_or_else(|| AppError::validation("gate_id is required"))?,
        })
    }
}

/// Body of `POST /api/guest-approvals/{id}/decision`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// `approved` or `denied`.
    pub decision: ApprovalDecision,
}
