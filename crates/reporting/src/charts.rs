//! Analysis Charts

use crate::ReportError;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};

/// Charts produced by the offline analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Chart {
    /// Share of good and bad risk per payment history category
    RiskByHistory,
    /// Model scores before and after hyperparameter tuning
    TuningComparison,
}

impl Chart {
    pub const ALL: [Self; 2] = [Self::RiskByHistory, Self::TuningComparison];

    pub fn name(&self) -> &'static str {
        match self {
            Chart::RiskByHistory => "risk_by_history",
            Chart::TuningComparison => "tuning_comparison",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Chart::RiskByHistory => "risk_by_history.png",
            Chart::TuningComparison => "tuning_comparison.png",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Chart::RiskByHistory => "Creditworthiness by payment history",
            Chart::TuningComparison => "Model performance after tuning",
        }
    }
}

impl FromStr for Chart {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix(".png").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|chart| chart.name() == name)
            .ok_or_else(|| ReportError::UnknownChart(s.to_string()))
    }
}

/// Chart images stored under one directory
#[derive(Debug, Clone)]
pub struct ChartAssets {
    dir: PathBuf,
}

impl ChartAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where the chart is expected to be
    pub fn path(&self, chart: Chart) -> PathBuf {
        self.dir.join(chart.file_name())
    }

    /// Whether the chart image exists
    pub fn is_available(&self, chart: Chart) -> bool {
        self.path(chart).is_file()
    }

    /// Read the chart image bytes
    pub fn read(&self, chart: Chart) -> Result<Vec<u8>, ReportError> {
        let path = self.path(chart);
        if !path.is_file() {
            warn!("Chart {} not found at {}", chart.name(), path.display());
            return Err(ReportError::NotFound { path });
        }

        let bytes = std::fs::read(&path).map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Read chart {} ({} bytes)", chart.name(), bytes.len());
        Ok(bytes)
    }
}
