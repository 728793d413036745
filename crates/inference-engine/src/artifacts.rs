//! Model Artifacts

use crate::classifier::Classifier;
use crate::forest::RandomForest;
use crate::onnx::OnnxClassifier;
use crate::scaler::StandardScaler;
use crate::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Serialization format of the classifier artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    /// JSON export of the fitted tree arrays
    Forest,
    /// ONNX graph run with tract
    Onnx,
}

/// Locations of the three startup artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub columns: PathBuf,
    pub format: ModelFormat,
    /// Class labels of an ONNX classifier, in probability output order
    pub onnx_classes: Vec<i64>,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("artifacts/credit_risk_model.json"),
            scaler: PathBuf::from("artifacts/scaler.json"),
            columns: PathBuf::from("artifacts/model_columns.json"),
            format: ModelFormat::Forest,
            onnx_classes: vec![0, 1],
        }
    }
}

impl ArtifactPaths {
    /// Resolve relative paths against a base directory
    pub fn relative_to(mut self, base: &Path) -> Self {
        for path in [&mut self.model, &mut self.scaler, &mut self.columns] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Pre-fitted classifier, scaler and expected column order.
///
/// Immutable once built; share it behind an `Arc` across requests.
pub struct ModelArtifacts {
    classifier: Box<dyn Classifier>,
    scaler: StandardScaler,
    columns: Vec<String>,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("classifier", &self.classifier.name())
            .field("classes", &self.classifier.classes())
            .field("columns", &self.columns)
            .finish()
    }
}

impl ModelArtifacts {
    /// Assemble artifacts, checking that they agree with each other
    pub fn new(
        classifier: Box<dyn Classifier>,
        scaler: StandardScaler,
        columns: Vec<String>,
    ) -> Result<Self, ConfigurationError> {
        if columns.is_empty() {
            return Err(ConfigurationError::Inconsistent("column list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ConfigurationError::Inconsistent(format!(
                "column {duplicate} listed more than once"
            )));
        }

        if scaler.len() != columns.len() {
            return Err(ConfigurationError::Inconsistent(format!(
                "scaler has {} features but {} columns are declared",
                scaler.len(),
                columns.len()
            )));
        }
        if let Some(names) = scaler.feature_names() {
            if names != columns.as_slice() {
                return Err(ConfigurationError::Inconsistent(
                    "scaler was fitted on a different column order".to_string(),
                ));
            }
        }
        if classifier.n_features() != columns.len() {
            return Err(ConfigurationError::Inconsistent(format!(
                "classifier expects {} features but {} columns are declared",
                classifier.n_features(),
                columns.len()
            )));
        }

        Ok(Self {
            classifier,
            scaler,
            columns,
        })
    }

    /// Load all three artifacts; any failure aborts the whole load
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ConfigurationError> {
        for path in [&paths.model, &paths.scaler, &paths.columns] {
            if !path.is_file() {
                return Err(ConfigurationError::ArtifactMissing { path: path.clone() });
            }
        }

        let columns = load_columns(&paths.columns)?;
        let scaler = StandardScaler::from_json_file(&paths.scaler)?;
        let classifier: Box<dyn Classifier> = match paths.format {
            ModelFormat::Forest => Box::new(RandomForest::from_json_file(&paths.model)?),
            ModelFormat::Onnx => Box::new(OnnxClassifier::load(
                &paths.model,
                columns.len(),
                paths.onnx_classes.clone(),
            )?),
        };

        let artifacts = Self::new(classifier, scaler, columns)?;
        info!(
            "Model artifacts ready: {} classifier, {} columns",
            artifacts.classifier.name(),
            artifacts.columns.len()
        );
        Ok(artifacts)
    }

    /// The classifier
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// The scaler
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Expected column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn load_columns(path: &Path) -> Result<Vec<String>, ConfigurationError> {
    let json = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let columns: Vec<String> = serde_json::from_str(&json).map_err(|e| ConfigurationError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!("Loaded {} model columns from {}", columns.len(), path.display());
    Ok(columns)
}
