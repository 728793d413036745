//! Standard Scaler

use crate::{ConfigurationError, InferenceError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Pre-fitted standard scaler: `(x - mean) / scale` per feature.
///
/// The parameters are whatever the scaler learned during training; nothing
/// is refitted at inference time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(rename = "mean_")]
    mean: Vec<f64>,
    #[serde(rename = "scale_")]
    scale: Vec<f64>,
    #[serde(rename = "feature_names_in_", default, skip_serializing_if = "Option::is_none")]
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Create a scaler from fitted parameters
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        let scaler = Self {
            mean,
            scale,
            feature_names: None,
        };
        scaler.check()?;
        Ok(scaler)
    }

    /// Attach the feature names the scaler was fitted on
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self, String> {
        if names.len() != self.mean.len() {
            return Err(format!(
                "{} feature names for {} scaler columns",
                names.len(),
                self.mean.len()
            ));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Load fitted parameters from a JSON file with `mean_` and `scale_`
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigurationError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let malformed = |reason: String| ConfigurationError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let scaler: Self = serde_json::from_str(&json).map_err(|e| malformed(e.to_string()))?;
        scaler.check().map_err(malformed)?;

        info!("Loaded scaler with {} features from {}", scaler.len(), path.display());
        Ok(scaler)
    }

    fn check(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("scaler has no features".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean_ has {} entries but scale_ has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.mean.len() {
                return Err(format!(
                    "feature_names_in_ has {} entries for {} features",
                    names.len(),
                    self.mean.len()
                ));
            }
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err("mean_ contains non-finite values".to_string());
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err("scale_ must be finite and non-negative".to_string());
        }
        Ok(())
    }

    /// Apply the affine transform to an ordered feature vector
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if x.len() != self.mean.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.mean.len(),
                actual: x.len(),
            });
        }

        Ok(x.iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(v, (mean, scale))| {
                // Zero variance columns are left unscaled
                let denom = if *scale == 0.0 { 1.0 } else { *scale };
                (v - mean) / denom
            })
            .collect())
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Whether the scaler has no features
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Feature names seen during fitting, if recorded
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 4.0]).unwrap();
        let scaled = scaler.transform(&[14.0, -2.0]).unwrap();
        assert_eq!(scaled, vec![2.0, -0.5]);
    }

    #[test]
    fn test_zero_scale_leaves_centered_value() {
        let scaler = StandardScaler::new(vec![1.0], vec![0.0]).unwrap();
        assert_eq!(scaler.transform(&[3.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let scaler = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        assert_eq!(
            scaler.transform(&[1.0]),
            Err(InferenceError::InvalidInputShape { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![1.0, 1.0]).is_err());
        assert!(StandardScaler::new(vec![0.0], vec![-1.0]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_parse_fitted_json() {
        let json = r#"{"mean_": [1.0, 2.0], "scale_": [0.5, 1.5], "feature_names_in_": ["a", "b"]}"#;
        let scaler: StandardScaler = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.len(), 2);
        assert_eq!(scaler.feature_names(), Some(&["a".to_string(), "b".to_string()][..]));
    }

    #[test]
    fn test_missing_file() {
        let err = StandardScaler::from_json_file(Path::new("/nonexistent/scaler.json")).unwrap_err();
        assert!(matches!(err, ConfigurationError::Io { .. }));
    }
}
