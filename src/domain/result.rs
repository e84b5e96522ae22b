//! Result type alias for Tombola

use super::errors::TombolaError;

/// Result type alias for Tombola operations
///
/// # Examples
///
/// ```
/// use tombola::domain::result::Result;
/// use tombola::domain::errors::TombolaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TombolaError::InvalidArgument("missing _id".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TombolaError>;
