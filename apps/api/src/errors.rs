use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::extract::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Remote model call failed: {0}")]
    RemoteCallFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat { .. } => AppError::UnsupportedFormat(e.to_string()),
            ExtractError::Pdf(_) => AppError::Extraction(e.to_string()),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::MissingCredential => AppError::ServiceUnavailable(e.to_string()),
            AnalysisError::RemoteCallFailed(inner) => AppError::RemoteCallFailed(inner.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            AppError::Extraction(msg) => {
                tracing::warn!("Resume extraction failed: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    format!("Could not read the resume: {msg}"),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Analysis unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Gemini service not available. Set GEMINI_API_KEY and restart the service."
                        .to_string(),
                )
            }
            AppError::RemoteCallFailed(msg) => {
                tracing::error!("Gemini call failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REMOTE_CALL_FAILED",
                    format!(
                        "Communication with Gemini failed: {msg}. Check the API key and the \
                         model configured in GEMINI_MODEL."
                    ),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
