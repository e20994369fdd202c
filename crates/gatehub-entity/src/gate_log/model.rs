//! Entry/exit log entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatehub_core::types::{
    GateId, GateLogId, GuestId, PermitId, StickerId, TenantId, UserId,
};

use super::key::{NaturalKey, to_store_precision};
use super::kind::{Direction, EntryType};

/// A persisted gate crossing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EntryExitLog {
    /// Unique log identifier.
    pub id: GateLogId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Gate where the crossing happened.
    pub gate_id: GateId,
    /// Category of the person or vehicle.
    pub entry_type: EntryType,
    /// Entry or exit.
    pub direction: Direction,
    /// When the crossing happened on the device.
    pub timestamp: DateTime<Utc>,
    /// Vehicle sticker scanned at the gate.
    pub sticker_id: Option<StickerId>,
    /// Registered guest record.
    pub guest_id: Option<GuestId>,
    /// Permit the crossing was made under.
    pub permit_id: Option<PermitId>,
    /// Guard on duty when the record was captured.
    pub guard_on_duty_id: Option<UserId>,
    /// Vehicle plate as typed or scanned.
    pub vehicle_plate: Option<String>,
    /// Stated purpose of the visit.
    pub purpose: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the server received the record.
    pub created_at: DateTime<Utc>,
}

impl EntryExitLog {
    /// The deduplication key of this record.
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(self.timestamp, self.gate_id, self.vehicle_plate.clone())
    }
}

/// A record as captured by a gate device and uploaded for sync.
///
/// Carries no tenant: the tenant is always taken from the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateLogSubmission {
    /// Gate where the crossing happened.
    pub gate_id: GateId,
    /// Category of the person or vehicle.
    pub entry_type: EntryType,
    /// Entry or exit.
    pub direction: Direction,
    /// Device-side event time.
    pub timestamp: DateTime<Utc>,
    /// Vehicle sticker scanned at the gate.
    #[serde(default)]
    pub sticker_id: Option<StickerId>,
    /// Registered guest record.
    #[serde(default)]
    pub guest_id: Option<GuestId>,
    /// Permit the crossing was made under.
    #[serde(default)]
    pub permit_id: Option<PermitId>,
    /// Guard on duty; defaults to the uploading caller.
    #[serde(default)]
    pub guard_on_duty_id: Option<UserId>,
    /// Vehicle plate.
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    /// Stated purpose of the visit.
    #[serde(default)]
    pub purpose: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A tenant-scoped record ready to be inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntryExitLog {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Gate where the crossing happened.
    pub gate_id: GateId,
    /// Category of the person or vehicle.
    pub entry_type: EntryType,
    /// Entry or exit.
    pub direction: Direction,
    /// Event time at store precision.
    pub timestamp: DateTime<Utc>,
    /// Vehicle sticker scanned at the gate.
    pub sticker_id: Option<StickerId>,
    /// Registered guest record.
    pub guest_id: Option<GuestId>,
    /// Permit the crossing was made under.
    pub permit_id: Option<PermitId>,
    /// Guard on duty.
    pub guard_on_duty_id: UserId,
    /// Vehicle plate.
    pub vehicle_plate: Option<String>,
    /// Stated purpose of the visit.
    pub purpose: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl NewEntryExitLog {
    /// Scope a device submission to a tenant, defaulting the guard to `caller`.
    pub fn from_submission(
        submission: GateLogSubmission,
        tenant_id: TenantId,
        caller: UserId,
    ) -> Self {
        Self {
            tenant_id,
            gate_id: submission.gate_id,
            entry_type: submission.entry_type,
            direction: submission.direction,
            timestamp: to_store_precision(submission.timestamp),
            sticker_id: submission.sticker_id,
            guest_id: submission.guest_id,
            permit_id: submission.permit_id,
            guard_on_duty_id: submission.guard_on_duty_id.unwrap_or(caller),
            vehicle_plate: submission.vehicle_plate,
            purpose: submission.purpose,
            notes: submission.notes,
        }
    }

    /// The deduplication key of this record.
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(self.timestamp, self.gate_id, self.vehicle_plate.clone())
    }
}
