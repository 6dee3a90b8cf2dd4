//! Day-count derivation for leave request intake.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};

/// Derives the day count for a leave request.
///
/// When no explicit count is supplied, the count is the inclusive span
/// `(end - start) in days + 1`, floored at a minimum of 1. The span is a
/// plain calendar-day count: weekends and holidays are **not** excluded.
/// An explicit `day_count`, if supplied, always overrides the derived
/// value (policy allows manual correction).
///
/// # Errors
///
/// - `InvalidDateRange` if `start > end`
/// - `Validation` if an explicit count of 0 is supplied
///
/// # Example
///
/// ```
/// use bordro_engine::calculation::derive_day_count;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
/// assert_eq!(derive_day_count(start, end, None).unwrap(), 3);
/// assert_eq!(derive_day_count(start, end, Some(2)).unwrap(), 2);
/// ```
pub fn derive_day_count(
    start: NaiveDate,
    end: NaiveDate,
    explicit: Option<u32>,
) -> EngineResult<u32> {
    if start > end {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    if let Some(count) = explicit {
        if count == 0 {
            return Err(EngineError::Validation {
                field: "day_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        return Ok(count);
    }

    let span = (end - start).num_days() + 1;
    Ok(span.max(1) as u32)
}
