//! Attendance adjustment resolution.
//!
//! Maps a period's daily attendance records into the figures payroll and
//! reporting consume: total overtime hours and day counts per status.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollRates;
use crate::models::{AttendanceRecord, AttendanceStatus, PayPeriod};

/// Attendance figures aggregated over one payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAttendance {
    /// Sum of recorded overtime hours across in-period records.
    pub overtime_hours: Decimal,
    /// Days marked Absent, exposed for reporting.
    pub absent_days: u32,
    /// Days marked OnLeave.
    pub on_leave_days: u32,
}

/// Aggregates an employee's attendance records over a period.
///
/// Records outside the period are ignored; the store guarantees at most
/// one record per (employee, date), so no de-duplication happens here.
pub fn resolve_period_attendance(
    records: &[AttendanceRecord],
    period: PayPeriod,
) -> PeriodAttendance {
    let mut overtime_hours = Decimal::ZERO;
    let mut absent_days = 0;
    let mut on_leave_days = 0;

    for record in records.iter().filter(|r| period.contains(r.date)) {
        overtime_hours += record.overtime_hours;
        match record.status {
            AttendanceStatus::Absent => absent_days += 1,
            AttendanceStatus::OnLeave => on_leave_days += 1,
            AttendanceStatus::Normal => {}
        }
    }

    PeriodAttendance {
        overtime_hours,
        absent_days,
        on_leave_days,
    }
}

/// Derives the overtime hourly rate from a monthly salary.
///
/// The base hourly rate is the monthly salary spread over the
/// conventional month (`days_in_month x daily_hours`); overtime is paid
/// at that rate times the configured multiplier.
pub fn overtime_hourly_rate(monthly_salary: Decimal, rates: &PayrollRates) -> Decimal {
    let monthly_hours = rates.days_in_month * rates.daily_hours;
    (monthly_salary / monthly_hours * rates.overtime_multiplier).round_dp(2)
}
