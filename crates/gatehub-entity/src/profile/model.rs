//! Profile entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatehub_core::types::{HouseholdId, TenantId, UserId};

use super::role::UserRole;

/// Server-side record describing who an authenticated user is.
///
/// The tenant and role used for every authorization decision come from
/// here, never from request input.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Same id as the authenticated user.
    pub id: UserId,
    /// Tenant the user belongs to (`None` for platform superadmins).
    pub tenant_id: Option<TenantId>,
    /// Household the user belongs to, for household roles.
    pub household_id: Option<HouseholdId>,
    /// Role within the tenant.
    pub role: UserRole,
}
