//! Column Reordering

use crate::error::SchemaMismatchError;
use crate::record::FeatureRecord;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Lay out a record in the model's expected column order.
///
/// The record's key set must equal the expected columns exactly. Missing
/// features are never zero-filled and extra features are never dropped.
pub fn reorder<S: AsRef<str>>(
    record: &FeatureRecord,
    expected_columns: &[S],
) -> Result<Vec<f64>, SchemaMismatchError> {
    let mut mismatch = SchemaMismatchError::default();
    let mut seen = HashSet::with_capacity(expected_columns.len());
    let mut ordered = Vec::with_capacity(expected_columns.len());

    for column in expected_columns {
        let column = column.as_ref();
        if !seen.insert(column) {
            mismatch.duplicated.push(column.to_string());
            continue;
        }
        match record.get(column) {
            Some(value) => ordered.push(value),
            None => mismatch.missing.push(column.to_string()),
        }
    }

    mismatch.unexpected = record
        .keys()
        .filter(|key| !seen.contains(key))
        .map(str::to_string)
        .collect();

    if !mismatch.is_empty() {
        warn!("Schema mismatch: {}", mismatch);
        return Err(mismatch);
    }

    debug!("Reordered {} features to model column order", ordered.len());
    Ok(ordered)
}
