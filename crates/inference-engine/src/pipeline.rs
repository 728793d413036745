//! Inference Pipeline Implementation

use crate::artifacts::ModelArtifacts;
use crate::engine::{interpret, ClassConvention, PredictionResult};
use crate::{ConfigurationError, InferenceError, PipelineError};
use feature_assembler::{assemble, reorder, FeatureRecord, Numerics, Selections};
use encoding_registry::FEATURE_NAMES;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// The interpreted prediction
    pub prediction: PredictionResult,
    /// The resolved feature row, before reordering and scaling
    pub features: FeatureRecord,
    /// Pipeline latency in microseconds
    pub latency_us: u64,
}

/// Assemble → reorder → scale → predict → interpret over shared artifacts
#[derive(Debug, Clone)]
pub struct InferencePipeline {
    artifacts: Arc<ModelArtifacts>,
    convention: ClassConvention,
}

impl InferencePipeline {
    /// Create a pipeline, checking the class convention against the classifier
    pub fn new(artifacts: Arc<ModelArtifacts>, convention: ClassConvention) -> Result<Self, ConfigurationError> {
        convention
            .check(artifacts.classifier().classes())
            .map_err(ConfigurationError::Inconsistent)?;

        let registry_columns = FEATURE_NAMES.len() == artifacts.columns().len()
            && FEATURE_NAMES
                .iter()
                .all(|name| artifacts.columns().iter().any(|c| c == name));
        if !registry_columns {
            warn!("Model columns differ from the encoding registry; every prediction will fail with a schema mismatch");
        }

        info!(
            "Inference pipeline ready (good_class={}, bad_class={})",
            convention.good_class, convention.bad_class
        );
        Ok(Self { artifacts, convention })
    }

    /// Shared artifacts
    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Apply the fitted scaler
    pub fn scale(&self, ordered: &[f64]) -> Result<Vec<f64>, InferenceError> {
        self.artifacts.scaler().transform(ordered)
    }

    /// Classifier label and class probabilities for one scaled vector
    pub fn predict(&self, scaled: &[f64]) -> Result<(i64, Vec<f64>), InferenceError> {
        self.artifacts.classifier().predict_with_proba(scaled)
    }

    /// Turn a label and probabilities into a verdict
    pub fn interpret(&self, label: i64, probabilities: &[f64]) -> Result<PredictionResult, InferenceError> {
        interpret(
            label,
            probabilities,
            self.artifacts.classifier().classes(),
            &self.convention,
        )
    }

    /// Run an already assembled record through the model
    pub fn run_record(&self, record: &FeatureRecord) -> Result<PredictionResult, PipelineError> {
        let ordered = reorder(record, self.artifacts.columns())?;
        let scaled = self.scale(&ordered)?;
        let (label, probabilities) = self.predict(&scaled)?;
        Ok(self.interpret(label, &probabilities)?)
    }

    /// Run the full pipeline from form selections and numerics
    pub fn run(&self, selections: &Selections, numerics: &Numerics) -> Result<PipelineOutput, PipelineError> {
        let start = Instant::now();

        let features = assemble(selections, numerics)?;
        let prediction = self.run_record(&features)?;

        let latency_us = start.elapsed().as_micros() as u64;
        debug!(
            "Prediction: {} ({}) in {}us",
            prediction.verdict.as_str(),
            prediction.confidence_display(),
            latency_us
        );

        Ok(PipelineOutput {
            prediction,
            features,
            latency_us,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactPaths;
    use crate::engine::Verdict;
    use crate::forest::RandomForest;
    use crate::scaler::StandardScaler;
    use encoding_registry::{CategoricalAttribute, NumericAttribute};
    use feature_assembler::{AssemblyError, FormInput};
    use proptest::prelude::*;
    use std::path::Path;

    fn fixture_pipeline() -> InferencePipeline {
        let paths = ArtifactPaths::default().relative_to(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../.."));
        let artifacts = ModelArtifacts::load(&paths).unwrap();
        InferencePipeline::new(Arc::new(artifacts), ClassConvention::default()).unwrap()
    }

    fn high_risk_input() -> FormInput {
        FormInput::defaults()
            .with_selection(CategoricalAttribute::AccountBalance, "Negative balance (< 0 DM)")
            .with_selection(CategoricalAttribute::PaymentStatus, "Delay in paying off in the past")
            .with_numeric(NumericAttribute::CreditAmount, 15_000.0)
            .with_numeric(NumericAttribute::InstalmentPercent, 4.0)
    }

    #[test]
    fn test_all_defaults_scenario() {
        let pipeline = fixture_pipeline();
        let input = FormInput::defaults();
        let output = pipeline.run(&input.selections, &input.numerics).unwrap();

        let prediction = &output.prediction;
        assert!(matches!(prediction.verdict, Verdict::GoodRisk | Verdict::BadRisk));
        assert!((0.0..=100.0).contains(&prediction.confidence_percent()));
        assert_eq!(output.features.len(), FEATURE_NAMES.len());

        // Fixture forest: (0.65 + 0.76 + 0.70) / 3
        assert_eq!(prediction.verdict, Verdict::GoodRisk);
        assert_eq!(prediction.confidence_display(), "70.33%");
    }

    #[test]
    fn test_high_risk_applicant() {
        let pipeline = fixture_pipeline();
        let input = high_risk_input();
        let output = pipeline.run(&input.selections, &input.numerics).unwrap();

        // Fixture forest: (0.62 + 0.58 + 0.44) / 3
        assert_eq!(output.prediction.verdict, Verdict::BadRisk);
        assert_eq!(output.prediction.confidence_display(), "54.67%");
        assert!(output.prediction.verdict.advisory().is_some());
    }

    #[test]
    fn test_unknown_label_aborts_request() {
        let pipeline = fixture_pipeline();
        let input = FormInput::defaults().with_selection(CategoricalAttribute::Savings, "Gold bars");
        let err = pipeline.run(&input.selections, &input.numerics).unwrap_err();
        assert!(matches!(err, PipelineError::Assembly(AssemblyError::Encoding(_))));
    }

    #[test]
    fn test_column_absent_from_record_is_schema_mismatch() {
        let pipeline = fixture_pipeline();
        let input = FormInput::defaults();
        let mut record = assemble(&input.selections, &input.numerics).unwrap();
        record.remove("Telephone");

        match pipeline.run_record(&record) {
            Err(PipelineError::SchemaMismatch(e)) => assert_eq!(e.missing, vec!["Telephone".to_string()]),
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_artifact_with_unknown_column_fails_per_request() {
        let mut columns: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        columns[19] = "Residence_Permit".to_string();

        let forest = RandomForest::from_json_str(
            r#"{"classes": [0, 1], "n_features": 20, "trees": [{"children_left": [-1], "children_right": [-1],
                "feature": [-2], "threshold": [-2.0], "value": [[0.3, 0.7]]}]}"#,
        )
        .unwrap();
        let scaler = StandardScaler::new(vec![0.0; 20], vec![1.0; 20]).unwrap();
        let artifacts = ModelArtifacts::new(Box::new(forest), scaler, columns).unwrap();
        let pipeline = InferencePipeline::new(Arc::new(artifacts), ClassConvention::default()).unwrap();

        let input = FormInput::defaults();
        let err = pipeline.run(&input.selections, &input.numerics).unwrap_err();
        match err {
            PipelineError::SchemaMismatch(e) => {
                assert_eq!(e.missing, vec!["Residence_Permit".to_string()]);
                assert_eq!(e.unexpected, vec!["Foreign_Worker".to_string()]);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_reorder_uses_artifact_column_order() {
        // Same forest and scaler as the fixtures, columns reversed
        let base = fixture_pipeline();
        let reversed: Vec<String> = base.artifacts().columns().iter().rev().cloned().collect();

        let forest = RandomForest::from_json_str(
            r#"{"classes": [0, 1], "n_features": 20, "trees": [{"children_left": [1, -1, -1], "children_right": [2, -1, -1],
                "feature": [19, -2, -2], "threshold": [1.5, -2.0, -2.0], "value": [[0, 1], [1, 0], [0, 1]]}]}"#,
        )
        .unwrap();
        // Feature 19 of the reversed layout is Account_Balance
        let scaler = StandardScaler::new(vec![0.0; 20], vec![1.0; 20]).unwrap();
        let artifacts = ModelArtifacts::new(Box::new(forest), scaler, reversed).unwrap();
        let pipeline = InferencePipeline::new(Arc::new(artifacts), ClassConvention::default()).unwrap();

        let low = FormInput::defaults();
        let high = FormInput::defaults().with_selection(CategoricalAttribute::AccountBalance, "Balance > 200 DM");
        assert_eq!(pipeline.run(&low.selections, &low.numerics).unwrap().prediction.verdict, Verdict::BadRisk);
        assert_eq!(pipeline.run(&high.selections, &high.numerics).unwrap().prediction.verdict, Verdict::GoodRisk);
    }

    #[test]
    fn test_onnx_model_end_to_end() {
        let defaults = ArtifactPaths::default().relative_to(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../.."));
        let paths = ArtifactPaths {
            model: defaults.model.with_file_name("credit_risk_model.onnx"),
            format: crate::ModelFormat::Onnx,
            ..defaults
        };
        let artifacts = Arc::new(ModelArtifacts::load(&paths).unwrap());
        let pipeline = InferencePipeline::new(artifacts, ClassConvention::default()).unwrap();

        let input = FormInput::defaults();
        let output = pipeline.run(&input.selections, &input.numerics).unwrap();
        assert_eq!(output.prediction.verdict, Verdict::GoodRisk);
        assert_eq!(output.prediction.confidence_display(), "57.19%");

        let input = high_risk_input();
        let output = pipeline.run(&input.selections, &input.numerics).unwrap();
        assert_eq!(output.prediction.verdict, Verdict::BadRisk);
        assert_eq!(output.prediction.confidence_display(), "99.96%");
    }

    #[test]
    fn test_mismatched_convention_is_rejected() {
        let paths = ArtifactPaths::default().relative_to(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../.."));
        let artifacts = Arc::new(ModelArtifacts::load(&paths).unwrap());
        let convention = ClassConvention {
            good_class: 2,
            bad_class: 1,
        };
        assert!(InferencePipeline::new(artifacts, convention).is_err());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let pipeline = fixture_pipeline();
        let input = high_risk_input();
        let first = pipeline.run(&input.selections, &input.numerics).unwrap();
        for _ in 0..10 {
            let again = pipeline.run(&input.selections, &input.numerics).unwrap();
            assert_eq!(again.prediction, first.prediction);
            assert_eq!(again.features, first.features);
        }
    }

    fn arbitrary_input() -> impl Strategy<Value = FormInput> {
        let selections: Vec<_> = CategoricalAttribute::ALL
            .into_iter()
            .map(|attribute| {
                let labels = attribute.table().entries();
                (0..labels.len()).prop_map(move |i| (attribute, labels[i].label.to_string()))
            })
            .collect();
        let numerics: Vec<_> = NumericAttribute::ALL
            .into_iter()
            .map(|attribute| {
                let domain = attribute.domain();
                (domain.min as i64..=domain.max as i64).prop_map(move |v| (attribute, v as f64))
            })
            .collect();

        (selections, numerics).prop_map(|(selections, numerics)| FormInput {
            selections: selections.into_iter().collect(),
            numerics: numerics.into_iter().collect(),
        })
    }

    proptest! {
        #[test]
        fn probabilities_sum_to_one(input in arbitrary_input()) {
            let pipeline = fixture_pipeline();
            let output = pipeline.run(&input.selections, &input.numerics).unwrap();
            let p = output.prediction.probabilities;
            prop_assert!((p.good + p.bad - 1.0).abs() < 1e-6);
            prop_assert!((0.0..=1.0).contains(&output.prediction.confidence));
        }

        #[test]
        fn scale_then_predict_is_deterministic(input in arbitrary_input()) {
            let pipeline = fixture_pipeline();
            let record = assemble(&input.selections, &input.numerics).unwrap();
            let ordered = reorder(&record, pipeline.artifacts().columns()).unwrap();

            let first = pipeline.predict(&pipeline.scale(&ordered).unwrap()).unwrap();
            let second = pipeline.predict(&pipeline.scale(&ordered).unwrap()).unwrap();
            prop_assert_eq!(&first, &second);

            // Verdict agrees with the classifier's own decision rule
            let scaled = pipeline.scale(&ordered).unwrap();
            prop_assert_eq!(first.0, pipeline.artifacts().classifier().predict(&scaled).unwrap());
        }
    }
}
