//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;

pub use auth::AuthUser;
pub use json::{ApiJson, validate_body};
pub use path::parse_id;
