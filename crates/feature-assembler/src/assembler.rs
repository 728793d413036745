//! Feature Record Assembly

use crate::error::AssemblyError;
use crate::input::{Numerics, Selections};
use crate::record::FeatureRecord;
use encoding_registry::{encode, Feature};
use tracing::debug;

/// Build a feature record from categorical selections and numeric inputs.
///
/// Each selection is encoded through the registry; numerics are passed
/// through unchanged. Numeric ranges belong to the input layer and are not
/// checked here, but a missing attribute, an unknown label or a non-finite
/// value aborts assembly.
pub fn assemble(selections: &Selections, numerics: &Numerics) -> Result<FeatureRecord, AssemblyError> {
    let mut record = FeatureRecord::new();

    for feature in Feature::ALL {
        let value = match feature {
            Feature::Categorical(attribute) => {
                let label = selections
                    .get(&attribute)
                    .ok_or(AssemblyError::MissingSelection(attribute))?;
                encode(attribute, label)? as f64
            }
            Feature::Numeric(attribute) => {
                let value = *numerics
                    .get(&attribute)
                    .ok_or(AssemblyError::MissingNumeric(attribute))?;
                if !value.is_finite() {
                    return Err(AssemblyError::NonFinite {
                        feature: attribute,
                        value,
                    });
                }
                value
            }
        };
        record.insert(feature.feature_name(), value);
    }

    debug!("Assembled feature record with {} features", record.len());
    Ok(record)
}
