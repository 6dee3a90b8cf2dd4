//! Error types for the payroll and leave rule engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during rule evaluation.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the rule engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Validation
/// failures and not-found lookups are distinct variants so the API layer
/// can map them to 400-style versus 404-style responses.
///
/// # Example
///
/// ```
/// use bordro_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A statutory rate constant in configuration was zero or negative.
    #[error("Invalid rate '{name}': {message}")]
    InvalidRate {
        /// The name of the offending rate field.
        name: String,
        /// A description of what made the rate invalid.
        message: String,
    },

    /// Position code was not found in the reference data.
    #[error("Position not found: {code}")]
    PositionNotFound {
        /// The position code that was not found.
        code: String,
    },

    /// Leave type code was not found in the reference data.
    #[error("Leave type not found: {code}")]
    LeaveTypeNotFound {
        /// The leave type code that was not found.
        code: String,
    },

    /// Employee id was not found in the employee store.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// Leave request id was not found in the leave store.
    #[error("Leave request not found: {id}")]
    LeaveRequestNotFound {
        /// The leave request id that was not found.
        id: Uuid,
    },

    /// No payroll record exists for the given employee and period.
    #[error("Payroll record not found for employee '{employee_id}' in period {year}-{month:02}")]
    PayrollNotFound {
        /// The employee id.
        employee_id: String,
        /// The period year.
        year: i32,
        /// The period month (1-12).
        month: u32,
    },

    /// A required field was missing or contained an invalid value.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// A date range had its end before its start.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// The start date supplied.
        start: NaiveDate,
        /// The end date supplied.
        end: NaiveDate,
    },

    /// An employee has neither an override salary nor a resolvable
    /// position base salary.
    #[error("No base salary resolvable for employee '{employee_id}'")]
    MissingBaseSalary {
        /// The employee id.
        employee_id: String,
    },

    /// A leave request status transition that the lifecycle does not allow.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// The caller's role is not permitted to perform the action.
    #[error("Role '{role}' may not perform '{action}' on '{resource}'")]
    Forbidden {
        /// The caller's role.
        role: String,
        /// The resource being accessed.
        resource: String,
        /// The action attempted.
        action: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_position_not_found_displays_code() {
        let error = EngineError::PositionNotFound {
            code: "unknown".to_string(),
        };
        assert_eq!(error.to_string(), "Position not found: unknown");
    }

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::Validation {
            field: "day_count".to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid field 'day_count': must be at least 1"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_both_dates() {
        let error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: start 2024-06-12 is after end 2024-06-10"
        );
    }

    #[test]
    fn test_payroll_not_found_zero_pads_month() {
        let error = EngineError::PayrollNotFound {
            employee_id: "emp_001".to_string(),
            year: 2024,
            month: 3,
        };
        assert_eq!(
            error.to_string(),
            "Payroll record not found for employee 'emp_001' in period 2024-03"
        );
    }

    #[test]
    fn test_missing_base_salary_displays_employee() {
        let error = EngineError::MissingBaseSalary {
            employee_id: "emp_007".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No base salary resolvable for employee 'emp_007'"
        );
    }

    #[test]
    fn test_forbidden_displays_triplet() {
        let error = EngineError::Forbidden {
            role: "employee".to_string(),
            resource: "payroll".to_string(),
            action: "generate".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Role 'employee' may not perform 'generate' on 'payroll'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_employee_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_employee_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
