//! Validation helpers shared across the domain

use chrono::Duration;

use crate::domain::error::DomainError;

/// Rejects names that are empty or consist only of whitespace.
///
/// The value is stored exactly as given; no trimming is applied.
pub(crate) fn require_non_blank(value: &str, what: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_argument(format!(
            "{what} name cannot be empty or blank"
        )));
    }
    Ok(())
}

/// Rejects negative time spans. Zero is allowed.
pub(crate) fn require_non_negative(duration: Duration, what: &str) -> Result<(), DomainError> {
    if duration < Duration::zero() {
        return Err(DomainError::invalid_argument(format!(
            "{what} cannot be negative"
        )));
    }
    Ok(())
}
