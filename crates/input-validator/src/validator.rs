//! Form Validator for Domain Checking

use crate::error::ValidationError;
use encoding_registry::{CategoricalAttribute, NumericAttribute, NumericDomain};
use feature_assembler::FormInput;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject numerics with a fractional part (every form input is an integer widget)
    pub whole_numbers_only: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            whole_numbers_only: true,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a result from collected errors
    pub fn from_errors(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }
}

/// Validator for applicant form input
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a domain
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        domain: &NumericDomain,
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if !domain.contains(value) {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min: domain.min,
                max: domain.max,
            });
        }
        if self.config.whole_numbers_only && value.fract() != 0.0 {
            return Err(ValidationError::NotWholeNumber { field, value });
        }
        Ok(())
    }

    /// Validate a numeric attribute against its declared domain
    pub fn validate_numeric(&self, attribute: NumericAttribute, value: f64) -> Result<(), ValidationError> {
        self.validate_range(attribute.feature_name(), value, &attribute.domain())
    }

    /// Validate that a label is offered for a categorical attribute
    pub fn validate_label(&self, attribute: CategoricalAttribute, label: &str) -> Result<(), ValidationError> {
        match attribute.table().code_for(label) {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownLabel {
                field: attribute.feature_name(),
                label: label.to_string(),
            }),
        }
    }

    /// Validate a complete form, collecting every problem
    pub fn validate(&self, input: &FormInput) -> ValidationResult {
        let mut errors = Vec::new();
        let mut fields_checked = 0;

        for attribute in CategoricalAttribute::ALL {
            fields_checked += 1;
            let result = match input.selections.get(&attribute) {
                Some(label) => self.validate_label(attribute, label),
                None => Err(ValidationError::MissingField {
                    field: attribute.feature_name(),
                }),
            };
            if let Err(e) = result {
                errors.push(e);
            }
        }

        for attribute in NumericAttribute::ALL {
            fields_checked += 1;
            let result = match input.numerics.get(&attribute) {
                Some(&value) => self.validate_numeric(attribute, value),
                None => Err(ValidationError::MissingField {
                    field: attribute.feature_name(),
                }),
            };
            if let Err(e) = result {
                errors.push(e);
            }
        }

        debug!("Validated {} fields, {} errors", fields_checked, errors.len());
        ValidationResult::from_errors(errors, fields_checked)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
