//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a profile can hold within the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform operator; not bound to a tenant.
    Superadmin,
    /// Head of the village administration.
    AdminHead,
    /// Village administration staff.
    AdminOfficer,
    /// Registered head of a household.
    HouseholdHead,
    /// Member of a household.
    HouseholdMember,
    /// Non-resident allowed to use a household's privileges.
    HouseholdBeneficialUser,
    /// Head of gate security.
    SecurityHead,
    /// Guard staffing a gate.
    SecurityOfficer,
}

impl UserRole {
    /// Check if this role staffs the gates.
    pub fn is_security(&self) -> bool {
        matches!(self, Self::SecurityHead | Self::SecurityOfficer)
    }

    /// Check if this role may answer on behalf of a household.
    pub fn can_decide_for_household(&self) -> bool {
        matches!(self, Self::HouseholdHead | Self::HouseholdMember)
    }

    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::AdminHead => "admin_head",
            Self::AdminOfficer => "admin_officer",
            Self::HouseholdHead => "household_head",
            Self::HouseholdMember => "household_member",
            Self::HouseholdBeneficialUser => "household_beneficial_user",
            Self::SecurityHead => "security_head",
            Self::SecurityOfficer => "security_officer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = gatehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "superadmin" => Ok(Self::Superadmin),
            "admin_head" => Ok(Self::AdminHead),
            "admin_officer" => Ok(Self::AdminOfficer),
            "household_head" => Ok(Self::HouseholdHead),
            "household_member" => Ok(Self::HouseholdMember),
            "household_beneficial_user" => Ok(Self::HouseholdBeneficialUser),
            "security_head" => Ok(Self::SecurityHead),
            "security_officer" => Ok(Self::SecurityOfficer),
            _ => Err(gatehub_core::AppError::validation(format!(
                "Invalid user role: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_roles() {
        assert!(UserRole::SecurityHead.is_security());
        assert!(UserRole::SecurityOfficer.is_security());
        assert!(!UserRole::AdminHead.is_security());
        assert!(!UserRole::HouseholdHead.is_security());
    }

    #[test]
    fn test_beneficial_user_cannot_decide() {
        assert!(UserRole::HouseholdMember.can_decide_for_household());
        assert!(!UserRole::HouseholdBeneficialUser.can_decide_for_household());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "SECURITY_OFFICER".parse::<UserRole>().expect("valid"),
            UserRole::SecurityOfficer
        );
        assert!("guard".parse::<UserRole>().is_err());
    }
}
