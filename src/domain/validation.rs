use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    MissingField,
    InvalidDate,
    InvalidTime,
    InvalidNumber,
    Mismatch,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingField => "missing field",
            Self::InvalidDate => "invalid date",
            Self::InvalidTime => "invalid time",
            Self::InvalidNumber => "invalid number",
            Self::Mismatch => "mismatch",
        })
    }
}

/// A rejected input field. `message` is what clients are shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub reason: ValidationReason,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        reason: ValidationReason,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            reason,
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::MissingField, "All fields are required")
    }

    /// Several absent fields reported together, in the order given.
    #[must_use]
    pub fn missing_fields(fields: &[&str]) -> Self {
        let joined = fields.join(", ");
        Self::new(
            joined.clone(),
            ValidationReason::MissingField,
            format!("Required fields missing: {joined}"),
        )
    }

    pub fn invalid_date(field: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::InvalidDate, "Invalid date format")
    }

    pub fn invalid_time(field: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::InvalidTime, "Invalid time format")
    }

    pub fn invalid_number(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::InvalidNumber, message)
    }

    pub fn mismatch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, ValidationReason::Mismatch, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_name() {
        let err = ValidationError::missing_fields(&["first_name", "city"]);
        assert_eq!(err.reason, ValidationReason::MissingField);
        assert_eq!(err.to_string(), "Required fields missing: first_name, city");
    }

    #[test]
    fn single_missing_field_uses_generic_message() {
        let err = ValidationError::missing("email");
        assert_eq!(err.field, "email");
        assert_eq!(err.to_string(), "All fields are required");
    }
}
