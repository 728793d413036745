//! ONNX Classifier using tract
//!
//! Expects a classifier export with a single `[1, n_features]` float input
//! and two tensor outputs: the predicted label and the class probabilities
//! (exported without the ZipMap post-processing node). The class list is not
//! recoverable from the graph and is supplied by configuration.

use crate::classifier::{check_input, Classifier};
use crate::{ConfigurationError, InferenceError};
use std::path::Path;
use tracing::{debug, info};
use tract_onnx::prelude::*;

/// Classifier backed by an optimized tract plan
pub struct OnnxClassifier {
    model: TypedRunnableModel<TypedModel>,
    classes: Vec<i64>,
    n_features: usize,
}

impl OnnxClassifier {
    /// Load and optimize an ONNX classifier
    pub fn load(path: &Path, n_features: usize, classes: Vec<i64>) -> Result<Self, ConfigurationError> {
        let malformed = |reason: String| ConfigurationError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        if classes.len() < 2 {
            return Err(malformed(format!("expected at least 2 classes, got {}", classes.len())));
        }

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|mut model| {
                model.set_input_fact(0, f32::fact([1, n_features]).into())?;
                model.into_optimized()?.into_runnable()
            })
            .map_err(|e| malformed(format!("{e:?}")))?;

        info!(
            "Loaded ONNX classifier from {} ({} features, classes {:?})",
            path.display(),
            n_features,
            classes
        );

        Ok(Self {
            model,
            classes,
            n_features,
        })
    }

    fn run(&self, x: &[f64]) -> Result<(i64, Vec<f64>), InferenceError> {
        check_input(self.n_features, x)?;

        let input: Tensor = tract_ndarray::Array2::from_shape_vec(
            (1, self.n_features),
            x.iter().map(|v| *v as f32).collect(),
        )
        .map_err(failed)?
        .into_tensor();

        let outputs = self.model.run(tvec!(input.into())).map_err(failed)?;
        if outputs.len() < 2 {
            return Err(InferenceError::InferenceFailed(format!(
                "expected label and probability outputs, got {} outputs",
                outputs.len()
            )));
        }

        let labels = outputs[0].cast_to::<i64>().map_err(failed)?;
        let label = labels
            .as_slice::<i64>()
            .map_err(failed)?
            .first()
            .copied()
            .ok_or_else(|| InferenceError::InferenceFailed("empty label output".to_string()))?;

        let probabilities = outputs[1].cast_to::<f32>().map_err(failed)?;
        let probabilities: Vec<f64> = probabilities
            .as_slice::<f32>()
            .map_err(failed)?
            .iter()
            .map(|p| *p as f64)
            .collect();

        if probabilities.len() != self.classes.len() {
            return Err(InferenceError::InferenceFailed(format!(
                "expected {} probabilities, got {}",
                self.classes.len(),
                probabilities.len()
            )));
        }

        debug!("ONNX decision: class {} {:?}", label, probabilities);
        Ok((label, probabilities))
    }
}

fn failed<E: std::fmt::Debug>(e: E) -> InferenceError {
    InferenceError::InferenceFailed(format!("{e:?}"))
}

impl Classifier for OnnxClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, x: &[f64]) -> Result<i64, InferenceError> {
        self.run(x).map(|(label, _)| label)
    }

    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, InferenceError> {
        self.run(x).map(|(_, probabilities)| probabilities)
    }

    // Both outputs come from one run of the graph
    fn predict_with_proba(&self, x: &[f64]) -> Result<(i64, Vec<f64>), InferenceError> {
        self.run(x)
    }

    fn name(&self) -> &str {
        "onnx"
    }
}
