//! Encoding Table Registry
//!
//! Fixed label-to-code tables for the categorical applicant attributes and
//! the domains of the numeric pass-through attributes. The codes are the ones
//! the credit model was trained on; they must never be recomputed.

mod attribute;
mod error;
mod table;

pub use attribute::{CategoricalAttribute, Feature, NumericAttribute, NumericDomain};
pub use error::EncodingError;
pub use table::{EncodingTable, LabelCode};

/// Number of categorical attributes
pub const CATEGORICAL_COUNT: usize = 13;

/// Number of numeric pass-through attributes
pub const NUMERIC_COUNT: usize = 7;

/// Total number of model features
pub const FEATURE_COUNT: usize = CATEGORICAL_COUNT + NUMERIC_COUNT;

/// Feature names in the column order of the training frame
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Account_Balance",
    "Duration_of_Credit_monthly",
    "Payment_Status_of_Previous_Credit",
    "Purpose",
    "Credit_Amount",
    "Value_Savings_Stocks",
    "Length_of_current_employment",
    "Instalment_per_cent",
    "Sex_Marital_Status",
    "Guarantors",
    "Duration_in_Current_address",
    "Most_valuable_available_asset",
    "Age_years",
    "Concurrent_Credits",
    "Type_of_apartment",
    "No_of_Credits_at_this_Bank",
    "Occupation",
    "No_of_dependents",
    "Telephone",
    "Foreign_Worker",
];

/// Encode a label for a categorical attribute.
///
/// Fails with [`EncodingError::UnknownLabel`] when the label is not part of
/// the attribute's table. There is no default code.
pub fn encode(attribute: CategoricalAttribute, label: &str) -> Result<i64, EncodingError> {
    attribute
        .table()
        .code_for(label)
        .ok_or_else(|| EncodingError::UnknownLabel {
            attribute,
            label: label.to_string(),
        })
}

/// Encode a label for an attribute given by its feature name
pub fn encode_by_name(feature_name: &str, label: &str) -> Result<i64, EncodingError> {
    let attribute = feature_name.parse::<CategoricalAttribute>()?;
    encode(attribute, label)
}

/// Valid labels for an attribute, in the order the form presents them
pub fn labels(attribute: CategoricalAttribute) -> Vec<&'static str> {
    attribute.table().labels().collect()
}
