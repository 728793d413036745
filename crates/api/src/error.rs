//! API Error Responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::PipelineError;
use input_validator::{ValidationError, ValidationResult};
use reporting::ReportError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid applicant data ({} problems)", .0.errors.len())]
    Validation(ValidationResult),
    #[error("Prediction failed: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("{0}")]
    NotFound(String),
    #[error("Report unavailable: {0}")]
    Report(ReportError),
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NotFound { .. } | ReportError::UnknownChart(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Report(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Pipeline(_) | ApiError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = match &self {
            ApiError::Validation(result) => {
                warn!("Rejected applicant data: {} problems", result.errors.len());
                json!({
                    "error": self.to_string(),
                    "status": status.as_u16(),
                    "errors": result.errors,
                    "messages": result.errors.iter().map(ValidationError::to_string).collect::<Vec<_>>(),
                })
            }
            ApiError::Pipeline(e) => {
                error!("Prediction failed: {}", e);
                json!({ "error": self.to_string(), "status": status.as_u16() })
            }
            ApiError::Report(e) => {
                error!("Report error: {}", e);
                json!({ "error": self.to_string(), "status": status.as_u16() })
            }
            ApiError::NotFound(_) => json!({ "error": self.to_string(), "status": status.as_u16() }),
        };

        (status, Json(body)).into_response()
    }
}
