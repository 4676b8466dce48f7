//! Validation error type.

use thiserror::Error;

/// Error returned when a caller-supplied parameter violates a constraint.
///
/// Validation runs before any request is built, so a `ValidationError` means
/// nothing was sent to the bank and no client state changed.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::validation::{validate_page_size, ValidationError};
///
/// let error = validate_page_size(25).unwrap_err();
/// assert_eq!(error.field, "pageSize");
/// assert!(error.to_string().contains("10, 20, 30"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// The API name of the offending parameter.
    pub field: &'static str,
    /// The constraint that was violated.
    pub reason: String,
}

impl ValidationError {
    /// Creates a new validation error for `field`.
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
