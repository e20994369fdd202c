//! RBAC enforcement: checks whether a role holds a required permission.

use gatehub_core::error::AppError;
use gatehub_entity::profile::UserRole;

use super::policies::{GatePermission, RbacPolicies};

/// Enforces role-based access control.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enforcer with custom policies.
    pub fn with_policies(policies: RbacPolicies) -> Self {
        Self { policies }
    }

    /// Returns `Ok(())` if `role` holds `permission`, an authorization error otherwise.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: GatePermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, &permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' is not allowed to {}",
                describe(permission)
            )))
        }
    }

    /// Checks whether the role holds the permission (returns bool).
    pub fn has_permission(&self, role: &UserRole, permission: GatePermission) -> bool {
        self.policies.has_permission(role, &permission)
    }
}

fn describe(permission: GatePermission) -> &'static str {
    match permission {
        GatePermission::SyncGateLogs => "sync gate logs",
        GatePermission::RequestGuestApproval => "request guest approvals",
        GatePermission::ViewGuestApproval => "view guest approvals",
        GatePermission::DecideGuestApproval => "decide guest approvals",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehub_core::error::ErrorKind;

    #[test]
    fn test_denial_names_role() {
        let err = RbacEnforcer::new()
            .require_permission(&UserRole::HouseholdMember, GatePermission::SyncGateLogs)
            .expect_err("must deny");
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(err.message.contains("household_member"));
    }

    #[test]
    fn test_security_officer_allowed() {
        assert!(
            RbacEnforcer::new()
                .require_permission(&UserRole::SecurityOfficer, GatePermission::SyncGateLogs)
                .is_ok()
        );
    }
}
