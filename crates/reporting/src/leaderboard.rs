//! Model Leaderboard

use crate::ReportError;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// One evaluated model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub model: String,
    /// Metric values, aligned with [`Leaderboard::metrics`]
    pub values: Vec<f64>,
}

/// Evaluation results of every trained model.
///
/// The first CSV column is the model name; every other column is a numeric
/// metric such as `Accuracy` or `ROC_AUC`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    metrics: Vec<String>,
    rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Load the leaderboard CSV
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        if !path.is_file() {
            warn!("Leaderboard not found at {}", path.display());
            return Err(ReportError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = std::fs::File::open(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let leaderboard = Self::from_reader(file)?;

        info!(
            "Loaded leaderboard: {} models, {} metrics",
            leaderboard.rows.len(),
            leaderboard.metrics.len()
        );
        Ok(leaderboard)
    }

    /// Parse leaderboard CSV from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, ReportError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.len() < 2 {
            return Err(ReportError::Malformed(
                "expected a model column and at least one metric".to_string(),
            ));
        }
        let metrics: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let model = record.get(0).unwrap_or_default().to_string();
            let values = record
                .iter()
                .skip(1)
                .zip(&metrics)
                .map(|(field, metric)| {
                    field.parse::<f64>().map_err(|_| {
                        ReportError::Malformed(format!("row {}: {metric} is not a number: {field:?}", line + 1))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(LeaderboardRow { model, values });
        }

        Ok(Self { metrics, rows })
    }

    /// Metric column names
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Rows in file order
    pub fn rows(&self) -> &[LeaderboardRow] {
        &self.rows
    }

    /// Value of a metric for one row
    pub fn value(&self, row: &LeaderboardRow, metric: &str) -> Option<f64> {
        let index = self.metrics.iter().position(|m| m == metric)?;
        row.values.get(index).copied()
    }

    /// Row with the highest value of `metric`; the earliest row wins ties
    pub fn best_by(&self, metric: &str) -> Result<Option<&LeaderboardRow>, ReportError> {
        let index = self
            .metrics
            .iter()
            .position(|m| m == metric)
            .ok_or_else(|| ReportError::UnknownMetric(metric.to_string()))?;

        let mut best: Option<&LeaderboardRow> = None;
        for row in &self.rows {
            let value = row.values[index];
            if value.is_nan() {
                continue;
            }
            if best.map_or(true, |b| value > b.values[index]) {
                best = Some(row);
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
Model,Accuracy,Precision,Recall,F1_Score,ROC_AUC
Logistic Regression,0.745,0.781,0.871,0.824,0.779
Random Forest,0.760,0.784,0.900,0.838,0.792
Random Forest_Tuned,0.775,0.790,0.914,0.848,0.806
";

    #[test]
    fn test_parse_leaderboard() {
        let leaderboard = Leaderboard::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(leaderboard.metrics().len(), 5);
        assert_eq!(leaderboard.rows().len(), 3);
        assert_eq!(leaderboard.rows()[0].model, "Logistic Regression");

        let row = &leaderboard.rows()[1];
        assert_eq!(leaderboard.value(row, "Recall"), Some(0.900));
        assert_eq!(leaderboard.value(row, "Loss"), None);
    }

    #[test]
    fn test_best_by_roc_auc() {
        let leaderboard = Leaderboard::from_reader(CSV.as_bytes()).unwrap();
        let best = leaderboard.best_by("ROC_AUC").unwrap().unwrap();
        assert_eq!(best.model, "Random Forest_Tuned");
    }

    #[test]
    fn test_best_by_unknown_metric() {
        let leaderboard = Leaderboard::from_reader(CSV.as_bytes()).unwrap();
        assert!(matches!(
            leaderboard.best_by("Loss"),
            Err(ReportError::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_empty_leaderboard_has_no_best() {
        let leaderboard = Leaderboard::from_reader("Model,ROC_AUC\n".as_bytes()).unwrap();
        assert_eq!(leaderboard.best_by("ROC_AUC").unwrap(), None);
    }

    #[test]
    fn test_non_numeric_metric() {
        let err = Leaderboard::from_reader("Model,ROC_AUC\nSVM,high\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::Malformed(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let leaderboard = Leaderboard::load(file.path()).unwrap();
        assert_eq!(leaderboard.rows().len(), 3);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Leaderboard::load(Path::new("/nonexistent/leaderboard_final.csv")).unwrap_err();
        assert!(matches!(err, ReportError::NotFound { .. }));
    }

    #[test]
    fn test_serializes_for_display() {
        let leaderboard = Leaderboard::from_reader("Model,ROC_AUC\nSVM,0.75\n".as_bytes()).unwrap();
        let json = serde_json::to_value(&leaderboard).unwrap();
        assert_eq!(json["metrics"][0], "ROC_AUC");
        assert_eq!(json["rows"][0]["model"], "SVM");
    }
}
