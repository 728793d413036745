//! Report Routes

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use reporting::{Chart, Leaderboard, LeaderboardRow};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::{ApiError, AppState};

/// Metric the best model is chosen by
pub const RANKING_METRIC: &str = "ROC_AUC";

/// Response for leaderboard endpoint
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub metrics: Vec<String>,
    pub rows: Vec<LeaderboardRow>,
    pub ranked_by: &'static str,
    /// Model with the highest ranking metric, if the column is present
    pub best: Option<String>,
}

/// Get the model leaderboard
pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Result<Json<LeaderboardResponse>, ApiError> {
    let leaderboard = Leaderboard::load(&state.reports.leaderboard)?;

    let best = match leaderboard.best_by(RANKING_METRIC) {
        Ok(row) => row.map(|row| row.model.clone()),
        Err(e) => {
            warn!("Leaderboard cannot be ranked: {}", e);
            None
        }
    };

    Ok(Json(LeaderboardResponse {
        metrics: leaderboard.metrics().to_vec(),
        rows: leaderboard.rows().to_vec(),
        ranked_by: RANKING_METRIC,
        best,
    }))
}

/// Chart entry in the listing
#[derive(Debug, Serialize)]
pub struct ChartSummary {
    pub name: &'static str,
    pub caption: &'static str,
    pub file_name: &'static str,
    pub available: bool,
}

/// List the analysis charts with their captions
pub async fn list_charts(State(state): State<Arc<AppState>>) -> Json<Vec<ChartSummary>> {
    let charts = Chart::ALL
        .into_iter()
        .map(|chart| ChartSummary {
            name: chart.name(),
            caption: chart.caption(),
            file_name: chart.file_name(),
            available: state.charts.is_available(chart),
        })
        .collect();
    Json(charts)
}

/// Get an analysis chart image
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let chart: Chart = name.parse()?;
    let bytes = state.charts.read(chart)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}
