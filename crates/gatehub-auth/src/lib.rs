//! # gatehub-auth
//!
//! Authentication and authorization for GateHub.
//!
//! ## Modules
//!
//! - `jwt`: HS256 access token issuing and validation
//! - `identity`: resolution of an authenticated user to tenant, household, and role
//! - `rbac`: role-to-permission policies and enforcement

pub mod identity;
pub mod jwt;
pub mod rbac;

pub use identity::{CallerIdentity, ProfileResolver};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use rbac::{GatePermission, RbacEnforcer, RbacPolicies};
