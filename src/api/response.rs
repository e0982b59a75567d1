//! Response types for the Roster Engine API.
//!
//! This module defines the success bodies that are not plain engine types
//! and the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AirframeType, AuditIssue, DayCoverage, LicenseCounts};

/// Body of `POST /manhours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManhoursResponse {
    /// The day reported.
    pub date: NaiveDate,
    /// Grade-weighted manhours worked on the day.
    pub manhours: Decimal,
    /// Manhours of the Monday-to-Sunday week, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_manhours: Option<Decimal>,
    /// Full coverage figures for the day.
    pub coverage: DayCoverage,
}

/// Body of `POST /license-counts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseCountsResponse {
    /// The day reported.
    pub date: NaiveDate,
    /// The airframe counted for.
    pub airframe: AirframeType,
    /// On-duty holders per license bucket.
    pub counts: LicenseCounts,
    /// Staff able to fill a B1 slot.
    pub b1_capable: u32,
    /// Staff able to fill a B2 slot.
    pub b2_capable: u32,
}

/// Body of `POST /audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResponse {
    /// Number of findings.
    pub issue_count: usize,
    /// The findings.
    pub issues: Vec<AuditIssue>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::SnapshotParseError { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_SNAPSHOT",
                    message,
                    "The schedule snapshot could not be decoded",
                ),
            ),
            EngineError::EmployeeNotFound { id } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    message,
                    format!("No employee with id '{}' is on the roster", id),
                ),
            ),
            EngineError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            EngineError::InvalidImportRow { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_IMPORT_ROW",
                    message,
                    "The import batch was rejected",
                ),
            ),
            EngineError::DuplicateAssignment { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_ASSIGNMENT", message),
            ),
            EngineError::InvalidRequest { .. } => {
                (StatusCode::BAD_REQUEST, ApiError::validation_error(message))
            }
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_employee_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::EmployeeNotFound {
            id: "99".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "EMPLOYEE_NOT_FOUND");
        assert!(api_error.error.details.unwrap().contains("99"));
    }

    #[test]
    fn test_invalid_request_maps_to_validation_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidRequest {
            message: "day_count must be at least 1".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/missing".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
