//! Convenience result type alias for TMS.

use crate::error::AppError;

/// A specialized `Result` type for TMS operations.
pub type AppResult<T> = Result<T, AppError>;
