//! Convenience result type alias for GateHub.

use crate::error::AppError;

/// A specialized `Result` type for GateHub operations.
pub type AppResult<T> = Result<T, AppError>;
