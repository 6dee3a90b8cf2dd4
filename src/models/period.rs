//! Payroll period model.
//!
//! A period is a (year, month) pair; payroll records are keyed uniquely
//! by (employee, period).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A payroll period identified by calendar year and month.
///
/// # Example
///
/// ```
/// use bordro_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2024, 6).unwrap();
/// assert!(period.contains(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The month, 1-12.
    pub month: u32,
}

impl PayPeriod {
    /// Creates a period, validating the month.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation {
                field: "month".to_string(),
                message: format!("must be between 1 and 12, got {}", month),
            });
        }
        Ok(Self { year, month })
    }

    /// First calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        // Month already validated at construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap())
    }

    /// Last calendar day of the period.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(next_year, 1, 1).unwrap())
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// Checks whether a date falls within the period, inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
