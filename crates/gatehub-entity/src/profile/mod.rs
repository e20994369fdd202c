//! Caller profile entities.

pub mod model;
pub mod role;

pub use model::Profile;
pub use role::UserRole;
