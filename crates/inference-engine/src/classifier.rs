//! Classifier Contract

use crate::InferenceError;

/// A pre-fitted binary classifier operating on one scaled feature vector.
///
/// `predict` must apply the model's own decision rule; callers never
/// recompute the label from the probabilities.
pub trait Classifier: Send + Sync {
    /// Class labels, in the order `predict_proba` reports them
    fn classes(&self) -> &[i64];

    /// Number of input features
    fn n_features(&self) -> usize;

    /// Predicted class label
    fn predict(&self, x: &[f64]) -> Result<i64, InferenceError>;

    /// Probability per class, aligned with [`Classifier::classes`]
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, InferenceError>;

    /// Label and probabilities for the same input vector
    fn predict_with_proba(&self, x: &[f64]) -> Result<(i64, Vec<f64>), InferenceError> {
        Ok((self.predict(x)?, self.predict_proba(x)?))
    }

    /// Human readable name
    fn name(&self) -> &str {
        "classifier"
    }
}

pub(crate) fn check_input(expected: usize, x: &[f64]) -> Result<(), InferenceError> {
    if x.len() != expected {
        return Err(InferenceError::InvalidInputShape {
            expected,
            actual: x.len(),
        });
    }
    Ok(())
}
