//! Result type alias for Aspex

use super::errors::AspexError;

/// Result type alias for Aspex operations
///
/// This is a convenience type alias that uses `AspexError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use aspex::domain::result::Result;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AspexError>;
