use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::ProviderError;
use crate::services::variant_workflow::WorkflowError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("External error: {0}")]
    External(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(value: ProviderError) -> Self {
        AppError::External(value.to_string())
    }
}

impl From<WorkflowError> for AppError {
    fn from(value: WorkflowError) -> Self {
        match value {
            WorkflowError::Validation(msg) => AppError::Validation(msg),
            WorkflowError::InFlight(what) => {
                AppError::Conflict(format!("{} already in flight", what))
            }
            WorkflowError::BadIndex(i) => {
                AppError::Validation(format!("no variant at index {}", i))
            }
            WorkflowError::InvalidState(state) => {
                AppError::Conflict(format!("operation not allowed while {}", state))
            }
        }
    }
}
