//! Validation Error Types

use serde::Serialize;
use thiserror::Error;

/// Errors during form input validation
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value has a fractional part where a whole number is expected
    #[error("{field} value {value} is not a whole number")]
    NotWholeNumber { field: &'static str, value: f64 },

    /// NaN or infinity
    #[error("{field} value is not a finite number")]
    NotFinite { field: &'static str },

    /// Label not offered for the attribute
    #[error("{field} has no option {label:?}")]
    UnknownLabel { field: &'static str, label: String },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
}
