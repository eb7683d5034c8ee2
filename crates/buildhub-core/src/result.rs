//! Convenience result type alias for BuildHub.

use crate::error::AppError;

/// A specialized `Result` type for BuildHub operations.
pub type AppResult<T> = Result<T, AppError>;
