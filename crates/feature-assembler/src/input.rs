//! Form Input

use encoding_registry::{CategoricalAttribute, NumericAttribute};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One label per categorical attribute
pub type Selections = BTreeMap<CategoricalAttribute, String>;

/// One value per numeric attribute
pub type Numerics = BTreeMap<NumericAttribute, f64>;

/// Current state of the applicant form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub selections: Selections,
    #[serde(default)]
    pub numerics: Numerics,
}

impl FormInput {
    /// Form state before the user touches anything: the first label of
    /// every list and every numeric default
    pub fn defaults() -> Self {
        let selections = CategoricalAttribute::ALL
            .into_iter()
            .map(|attribute| (attribute, attribute.table().default_label().to_string()))
            .collect();

        let numerics = NumericAttribute::ALL
            .into_iter()
            .map(|attribute| (attribute, attribute.domain().default))
            .collect();

        Self { selections, numerics }
    }

    /// Replace the selection for an attribute
    pub fn with_selection(mut self, attribute: CategoricalAttribute, label: impl Into<String>) -> Self {
        self.selections.insert(attribute, label.into());
        self
    }

    /// Replace the value for a numeric attribute
    pub fn with_numeric(mut self, attribute: NumericAttribute, value: f64) -> Self {
        self.numerics.insert(attribute, value);
        self
    }
}
