// Guard - Precondition checks for required values
//
// Small helper used at boundaries where a value must be present before
// work can continue (e.g. a surface before drawing, a presentation target
// before presenting).

use std::fmt;

/// Error raised when a required argument is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentError {
    /// Name of the missing parameter
    pub param: &'static str,
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "required argument '{}' is missing", self.param)
    }
}

impl std::error::Error for ArgumentError {}

/// Unwrap a required value or fail with an error naming the parameter
///
/// # Arguments
/// * `value` - The possibly-absent value
/// * `param` - Parameter name reported on failure
///
/// # Example
///
/// ```
/// use circle_demo::guard::require;
///
/// assert_eq!(require(Some(3), "count"), Ok(3));
/// assert_eq!(require::<u8>(None, "count").unwrap_err().param, "count");
/// ```
pub fn require<T>(value: Option<T>, param: &'static str) -> Result<T, ArgumentError> {
    value.ok_or(ArgumentError { param })
}
