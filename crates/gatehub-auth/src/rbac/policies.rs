//! Role-to-permission mapping.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use gatehub_entity::profile::UserRole;

/// An operation guarded by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePermission {
    /// Upload device-captured entry/exit logs.
    SyncGateLogs,
    /// Raise a guest approval request at the gate.
    RequestGuestApproval,
    /// Read the status of an approval request.
    ViewGuestApproval,
    /// Approve or deny a guest on behalf of a household.
    DecideGuestApproval,
}

/// Mapping from each role to its allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<GatePermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        let security: HashSet<GatePermission> = [
            GatePermission::SyncGateLogs,
            GatePermission::RequestGuestApproval,
            GatePermission::ViewGuestApproval,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::SecurityHead, security.clone());
        policies.insert(UserRole::SecurityOfficer, security);

        let household: HashSet<GatePermission> = [
            GatePermission::ViewGuestApproval,
            GatePermission::DecideGuestApproval,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::HouseholdHead, household.clone());
        policies.insert(UserRole::HouseholdMember, household);

        Self { policies }
    }

    /// Checks whether `role` holds `permission`.
    pub fn has_permission(&self, role: &UserRole, permission: &GatePermission) -> bool {
        self.policies
            .get(role)
            .is_some_and(|perms| perms.contains(permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
