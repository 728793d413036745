//! Prediction Routes

use axum::{extract::State, Json};
use feature_assembler::FormInput;
use inference_engine::{ClassProbabilities, PipelineOutput, Verdict};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::{ApiError, AppState};

/// One column of the resolved feature row
#[derive(Debug, Serialize)]
pub struct FeatureValue {
    pub name: String,
    pub value: f64,
}

/// Response for predictions endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub verdict: Verdict,
    pub status: &'static str,
    /// Probability of the predicted outcome (0.0 to 1.0)
    pub confidence: f64,
    /// Confidence as shown to the operator, e.g. `87.50%`
    pub confidence_display: String,
    pub probabilities: ClassProbabilities,
    pub advisory: Option<&'static str>,
    /// Feature row in training column order
    pub features: Vec<FeatureValue>,
    pub latency_us: u64,
}

impl From<PipelineOutput> for PredictionResponse {
    fn from(output: PipelineOutput) -> Self {
        let prediction = output.prediction;
        Self {
            verdict: prediction.verdict,
            status: prediction.verdict.status(),
            confidence: prediction.confidence,
            confidence_display: prediction.confidence_display(),
            probabilities: prediction.probabilities,
            advisory: prediction.verdict.advisory(),
            features: output
                .features
                .canonical_row()
                .into_iter()
                .map(|(name, value)| FeatureValue { name, value })
                .collect(),
            latency_us: output.latency_us,
        }
    }
}

/// Score one applicant
pub async fn create_prediction(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FormInput>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let validation = state.validator.validate(&input);
    if !validation.valid {
        metrics::counter!("credit_risk_predictions_rejected_total").increment(1);
        return Err(ApiError::Validation(validation));
    }

    let output = state
        .pipeline
        .run(&input.selections, &input.numerics)
        .inspect_err(|_| metrics::counter!("credit_risk_prediction_failures_total").increment(1))?;

    let verdict = output.prediction.verdict;
    metrics::counter!("credit_risk_predictions_total", "verdict" => verdict.as_str()).increment(1);
    metrics::histogram!("credit_risk_prediction_latency_us").record(output.latency_us as f64);
    debug!("Scored applicant: {}", verdict.as_str());

    Ok(Json(PredictionResponse::from(output)))
}
