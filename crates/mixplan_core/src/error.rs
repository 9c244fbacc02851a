use std::fmt;

use crate::model::ParameterField;

/// Errors raised when a `Parameters` value is validated.
///
/// Validation happens before any metric is computed, so a caller never sees
/// partial metrics for a bad parameter set.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A field violates its domain constraint (negative, non-finite, or a
    /// fractional count)
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// A field used as a denominator is zero
    DomainError { field: &'static str },
}

impl ParameterError {
    /// Name of the offending field
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ParameterError::InvalidParameter { field, .. } => field,
            ParameterError::DomainError { field } => field,
        }
    }

    #[must_use]
    pub fn is_domain_error(&self) -> bool {
        matches!(self, ParameterError::DomainError { .. })
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::InvalidParameter {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} ({value}): {reason}"),
            ParameterError::DomainError { field } => {
                write!(f, "{field} must be non-zero (used as a divisor)")
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Errors in the shape of a sweep itself, as opposed to a single bad grid point
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    /// The same field was declared as more than one dimension
    DuplicateDimension(ParameterField),
    /// No sweep preset is registered under this name
    UnknownPreset(String),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::DuplicateDimension(field) => {
                write!(f, "field {} is swept more than once", field.name())
            }
            SweepError::UnknownPreset(name) => write!(f, "unknown sweep preset {name:?}"),
        }
    }
}

impl std::error::Error for SweepError {}

pub type Result<T> = std::result::Result<T, ParameterError>;
