//! Leave balance accounting.
//!
//! Pure read-side computation over a person's leave requests within one
//! calendar year; safe to call repeatedly.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::LeaveRequest;

/// The result of a leave balance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Days consumed by counting requests in the reference year.
    pub used_days: u32,
    /// Entitlement minus used days, clamped at 0. Never negative.
    pub remaining_days: u32,
}

/// Computes days used and days remaining for one leave type and year.
///
/// `used_days` sums the stored `day_count` of every request that matches
/// the leave type, is Pending or Approved (Rejected and Cancelled requests
/// never consume entitlement), and starts in the reference year. Day
/// counts are trusted as stored; this accounting step does not recompute
/// them from the date range.
///
/// `remaining_days` is clamped at 0 even if `used_days` exceeds the
/// entitlement.
///
/// # Example
///
/// ```
/// use bordro_engine::calculation::leave_balance;
///
/// let balance = leave_balance("annual", 14, 2024, &[]);
/// assert_eq!(balance.used_days, 0);
/// assert_eq!(balance.remaining_days, 14);
/// ```
pub fn leave_balance(
    leave_type: &str,
    entitlement_days: u32,
    reference_year: i32,
    requests: &[LeaveRequest],
) -> LeaveBalance {
    let used_days: u32 = requests
        .iter()
        .filter(|r| r.leave_type == leave_type)
        .filter(|r| r.status.counts_toward_balance())
        .filter(|r| r.start_date.year() == reference_year)
        .map(|r| r.day_count)
        .sum();

    LeaveBalance {
        used_days,
        remaining_days: entitlement_days.saturating_sub(used_days),
    }
}
