//! Request context carrying the authenticated, tenant-resolved caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatehub_auth::CallerIdentity;
use gatehub_core::types::{HouseholdId, TenantId, UserId};
use gatehub_entity::profile::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API layer from a resolved [`CallerIdentity`] and passed into
/// service methods so that every operation knows who is acting and for
/// which tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// Tenant taken from the caller's profile.
    pub tenant_id: TenantId,
    /// Household of the caller, for household roles.
    pub household_id: Option<HouseholdId>,
    /// Role from the caller's profile.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for a resolved caller, stamped with the current time.
    pub fn new(identity: CallerIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            tenant_id: identity.tenant_id,
            household_id: identity.household_id,
            role: identity.role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller belongs to `household_id`.
    pub fn belongs_to_household(&self, household_id: HouseholdId) -> bool {
        self.household_id == Some(household_id)
    }
}
