//! Result type aliases
//!
//! `Result` is used by application plumbing (config, logging, CLI) and
//! `BridgeResult` by every portal-facing operation.

use super::errors::{AppError, BridgeError};

/// Result type alias for application operations
///
/// # Examples
///
/// ```
/// use practice_bridge::domain::result::Result;
/// use practice_bridge::domain::errors::AppError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AppError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for portal bridge operations
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;
