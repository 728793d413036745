//! Encoding Error Types

use crate::CategoricalAttribute;
use thiserror::Error;

/// Errors raised by the encoding registry.
///
/// Both variants mean the caller offered something the registry was never
/// configured with; they are never resolved by falling back to a default code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Label not defined for the attribute
    #[error("label {label:?} is not defined for {attribute}")]
    UnknownLabel {
        attribute: CategoricalAttribute,
        label: String,
    },

    /// Feature name not known to the registry
    #[error("unknown feature name: {0}")]
    UnknownFeature(String),
}
