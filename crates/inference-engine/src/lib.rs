//! Credit Risk Inference Engine
//!
//! Loads the pre-fitted scaler, classifier and column list once at startup
//! and runs the scale → predict → interpret sequence on assembled features.

mod artifacts;
mod classifier;
mod engine;
mod forest;
mod onnx;
mod pipeline;
mod scaler;

pub use artifacts::{ArtifactPaths, ModelArtifacts, ModelFormat};
pub use classifier::Classifier;
pub use engine::{interpret, ClassConvention, ClassProbabilities, PredictionResult, Verdict};
pub use forest::RandomForest;
pub use onnx::OnnxClassifier;
pub use pipeline::{InferencePipeline, PipelineOutput};
pub use scaler::StandardScaler;

use feature_assembler::{AssemblyError, SchemaMismatchError};
use std::path::PathBuf;
use thiserror::Error;

/// Tolerance for class probabilities summing to one
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Startup artifacts missing, unreadable or inconsistent
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Artifact not found: {}", .path.display())]
    ArtifactMissing { path: PathBuf },
    #[error("Failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed artifact {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("Inconsistent artifacts: {0}")]
    Inconsistent(String),
}

/// Errors during scaling or classification
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Class probabilities sum to {0}, expected 1")]
    InvalidProbabilities(f64),
    #[error("Class {0} is not among the classifier's classes")]
    UnknownClass(i64),
}

/// Failure of a single prediction request
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Feature assembly failed: {0}")]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    SchemaMismatch(#[from] SchemaMismatchError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
