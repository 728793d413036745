//! Reporting
//!
//! Read-only access to the offline evaluation outputs: the model
//! leaderboard CSV and the analysis chart images.

mod charts;
mod leaderboard;

pub use charts::{Chart, ChartAssets};
pub use leaderboard::{Leaderboard, LeaderboardRow};

use std::path::PathBuf;
use thiserror::Error;

/// Reporting errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Malformed leaderboard: {0}")]
    Malformed(String),
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
    #[error("Unknown chart: {0}")]
    UnknownChart(String),
}
