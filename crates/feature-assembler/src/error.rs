//! Assembly Error Types

use encoding_registry::{CategoricalAttribute, EncodingError, NumericAttribute};
use thiserror::Error;

/// Errors while building a feature record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssemblyError {
    /// Selection could not be encoded
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// No selection for a categorical attribute
    #[error("missing selection for {0}")]
    MissingSelection(CategoricalAttribute),

    /// No value for a numeric attribute
    #[error("missing numeric input for {0}")]
    MissingNumeric(NumericAttribute),

    /// Numeric value is NaN or infinite
    #[error("{feature} value {value} is not a finite number")]
    NonFinite {
        feature: NumericAttribute,
        value: f64,
    },
}

/// Feature record keys differ from the model's expected columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error(
    "feature record does not match model columns (missing: {missing:?}, unexpected: {unexpected:?}, duplicated: {duplicated:?})"
)]
pub struct SchemaMismatchError {
    /// Expected columns absent from the record
    pub missing: Vec<String>,
    /// Record keys not among the expected columns
    pub unexpected: Vec<String>,
    /// Columns listed more than once
    pub duplicated: Vec<String>,
}

impl SchemaMismatchError {
    /// Whether any difference was recorded
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.duplicated.is_empty()
    }
}
