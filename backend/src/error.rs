//! Error handling for the Stock Register server
//!
//! Provides consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Inventory API error: {0}")]
    InventoryApi(String),

    #[error("Reorder advisor error: {0}")]
    ReorderAdvisor(String),

    // Export errors
    #[error("Export error: {0}")]
    Export(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<shared::ValidationError> for AppError {
    fn from(err: shared::ValidationError) -> Self {
        AppError::Validation {
            field: err.field.clone(),
            message: err.to_string(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// HTTP status and response body for this error
    pub fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::InventoryApi(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "INVENTORY_API_ERROR".to_string(),
                    message: format!("Inventory API error: {}", msg),
                    field: None,
                },
            ),
            AppError::ReorderAdvisor(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "REORDER_ADVISOR_ERROR".to_string(),
                    message: format!("Reorder advisor error: {}", msg),
                    field: None,
                },
            ),
            AppError::Export(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "EXPORT_ERROR".to_string(),
                    message: format!("Export error: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("Material".to_string()), StatusCode::NOT_FOUND),
            (
                AppError::Validation {
                    field: "from".to_string(),
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::InventoryApi("down".to_string()), StatusCode::BAD_GATEWAY),
            (AppError::ReorderAdvisor("down".to_string()), StatusCode::BAD_GATEWAY),
            (AppError::Export("csv".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status_and_detail().0, expected);
        }
    }

    #[test]
    fn test_not_found_message() {
        let (_, detail) = AppError::NotFound("Material mat-1".to_string()).status_and_detail();
        assert_eq!(detail.code, "NOT_FOUND");
        assert_eq!(detail.message, "Material mat-1 not found");
        assert!(detail.field.is_none());
    }

    #[test]
    fn test_shared_validation_error_conversion() {
        let err = shared::validate_measurement(&shared::Measurement::new("Ream", 0)).unwrap_err();
        let app_err: AppError = err.into();
        let (status, detail) = app_err.status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.field.as_deref(), Some("sheets_per_unit"));
    }
}
