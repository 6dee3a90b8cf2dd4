//! Unpaid-leave day counting for payroll.

use std::collections::HashMap;

use crate::config::LeaveTypeConfig;
use crate::models::{LeaveRequest, LeaveStatus, PayPeriod};

/// Counts the unpaid-leave days an employee has within a payroll period.
///
/// A day counts when it is covered by an **Approved** request whose leave
/// type is unpaid; the request's date range is clipped to the period, so a
/// request straddling a month boundary only contributes the days that fall
/// inside the period. Requests whose leave type is missing from the
/// reference data are skipped rather than failing the computation.
pub fn unpaid_days_in_period(
    requests: &[LeaveRequest],
    leave_types: &HashMap<String, LeaveTypeConfig>,
    period: PayPeriod,
) -> u32 {
    let period_start = period.first_day();
    let period_end = period.last_day();

    requests
        .iter()
        .filter(|r| r.status == LeaveStatus::Approved)
        .filter(|r| {
            leave_types
                .get(&r.leave_type)
                .is_some_and(|lt| !lt.paid)
        })
        .map(|r| {
            let start = r.start_date.max(period_start);
            let end = r.end_date.min(period_end);
            if start > end {
                0
            } else {
                ((end - start).num_days() + 1) as u32
            }
        })
        .sum()
}
