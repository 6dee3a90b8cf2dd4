//! Response types for the HR engine API.
//!
//! This module defines the error response structures, the mapping from
//! engine errors to HTTP statuses, and the handful of response bodies
//! that are not just serialized domain records.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::batch::BatchError;
use crate::error::EngineError;
use crate::models::{PayPeriod, Role};

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
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 carrying a validation error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
    }

    /// A 404 for records without a dedicated engine error variant.
    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(code, message))
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidRate { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::PositionNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("POSITION_NOT_FOUND", message),
            },
            EngineError::LeaveTypeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LEAVE_TYPE_NOT_FOUND", message),
            },
            EngineError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::LeaveRequestNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LEAVE_REQUEST_NOT_FOUND", message),
            },
            EngineError::PayrollNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PAYROLL_NOT_FOUND", message),
            },
            EngineError::Validation { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            EngineError::InvalidDateRange { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DATE_RANGE", message),
            },
            EngineError::MissingBaseSalary { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("MISSING_BASE_SALARY", message),
            },
            EngineError::InvalidTransition { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_TRANSITION", message),
            },
            EngineError::Forbidden { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("FORBIDDEN", message),
            },
        }
    }
}

/// Response body for the leave balance endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveBalanceResponse {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The leave type code queried.
    pub leave_type: String,
    /// The calendar year the balance covers.
    pub year: i32,
    /// Annual entitlement for the leave type.
    pub entitlement_days: u32,
    /// Days consumed by pending and approved requests.
    pub used_days: u32,
    /// Entitlement minus used days, clamped at zero.
    pub remaining_days: u32,
}

/// Response body for the payroll generate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The period the batch covered.
    pub period: PayPeriod,
    /// Number of payroll records written.
    pub created_count: usize,
    /// Employees whose payroll could not be computed.
    pub errors: Vec<BatchError>,
}

/// Response body for the attendance save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSaveResponse {
    /// The date the entries applied to.
    pub date: NaiveDate,
    /// Entries written for the first time.
    pub created: usize,
    /// Entries that replaced an existing record for the same day.
    pub updated: usize,
}

/// Account view returned by the API. Never echoes the credential hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Login name.
    pub username: String,
    /// The account's role.
    pub role: Role,
    /// The linked employee, if any.
    pub employee_id: Option<String>,
    /// True until the first password change completes.
    pub requires_password_change: bool,
    /// Whether the account may log in.
    pub active: bool,
}
