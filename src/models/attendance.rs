//! Daily attendance model.
//!
//! One record exists per (employee, date); saving a date again overwrites
//! the prior record for that pair.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Quarter-hour step for recorded overtime.
const OVERTIME_STEP: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Daily attendance status for an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Present and working normally.
    Normal,
    /// Away on leave.
    OnLeave,
    /// Absent without leave.
    Absent,
}

/// A single day's attendance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// Attendance status for the day.
    pub status: AttendanceStatus,
    /// Overtime hours recorded for the day, in quarter-hour steps.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

impl AttendanceRecord {
    /// Validates the record: overtime must be non-negative and recorded
    /// in quarter-hour steps.
    pub fn validate(&self) -> EngineResult<()> {
        if self.overtime_hours < Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "overtime_hours".to_string(),
                message: format!("must not be negative, got {}", self.overtime_hours),
            });
        }
        if (self.overtime_hours % OVERTIME_STEP) != Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "overtime_hours".to_string(),
                message: format!(
                    "must be a multiple of 0.25, got {}",
                    self.overtime_hours
                ),
            });
        }
        Ok(())
    }
}
