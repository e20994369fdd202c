//! Resolves an authenticated user id to the tenant, household, and role
//! recorded in their profile.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use gatehub_core::error::AppError;
use gatehub_core::result::AppResult;
use gatehub_core::types::{HouseholdId, TenantId, UserId};
use gatehub_database::ProfileStore;
use gatehub_entity::profile::UserRole;

/// Who is calling, as established server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Authenticated user id.
    pub user_id: UserId,
    /// Tenant every read and write of the request is scoped to.
    pub tenant_id: TenantId,
    /// Household of the caller, for household roles.
    pub household_id: Option<HouseholdId>,
    /// Role within the tenant.
    pub role: UserRole,
}

/// Looks up caller profiles through a [`ProfileStore`].
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    profiles: Arc<dyn ProfileStore>,
}

impl ProfileResolver {
    /// Creates a resolver over the given profile store.
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Resolves `user_id` to a tenant-scoped identity.
    ///
    /// A missing profile or a profile without a tenant cannot act on tenant
    /// data and is rejected as an authorization failure.
    pub async fn resolve(&self, user_id: UserId) -> AppResult<CallerIdentity> {
        let profile = self
            .profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::authorization("No profile found for caller"))?;

        let tenant_id = profile
            .tenant_id
            .ok_or_else(|| AppError::authorization("Caller is not assigned to a tenant"))?;

        debug!(user_id = %user_id, tenant_id = %tenant_id, role = %profile.role, "Resolved caller");

        Ok(CallerIdentity {
            user_id,
            tenant_id,
            household_id: profile.household_id,
            role: profile.role,
        })
    }
}
