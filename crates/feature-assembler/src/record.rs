//! Feature Record

use encoding_registry::FEATURE_NAMES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single row of model input keyed by feature name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord {
    values: BTreeMap<String, f64>,
}

impl FeatureRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature value, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Remove a feature
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Get a feature value
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Feature names (sorted)
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Feature values, in key order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.values().copied()
    }

    /// Name/value pairs, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pairs in training column order, followed by any non-canonical keys
    pub fn canonical_row(&self) -> Vec<(String, f64)> {
        let mut row: Vec<(String, f64)> = FEATURE_NAMES
            .iter()
            .filter_map(|name| self.get(name).map(|v| (name.to_string(), v)))
            .collect();

        row.extend(
            self.iter()
                .filter(|(name, _)| !FEATURE_NAMES.iter().any(|n| n == name))
                .map(|(name, v)| (name.to_string(), v)),
        );
        row
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FeatureRecord {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
