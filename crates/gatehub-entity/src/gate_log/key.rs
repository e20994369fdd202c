//! Natural deduplication key for gate crossings.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use gatehub_core::types::GateId;

/// Identifies one physical crossing within a tenant.
///
/// Two records with equal keys describe the same event. Comparison is
/// structural, so a missing plate and an empty plate are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NaturalKey {
    /// Event time at store precision.
    pub timestamp: DateTime<Utc>,
    /// Gate where the crossing happened.
    pub gate_id: GateId,
    /// Vehicle plate, if one was scanned.
    pub vehicle_plate: Option<String>,
}

impl NaturalKey {
    /// Build a key, truncating the timestamp to store precision.
    pub fn new(timestamp: DateTime<Utc>, gate_id: GateId, vehicle_plate: Option<String>) -> Self {
        Self {
            timestamp: to_store_precision(timestamp),
            gate_id,
            vehicle_plate,
        }
    }
}

/// Truncate a timestamp to the microsecond resolution PostgreSQL keeps.
pub fn to_store_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(6)
}
