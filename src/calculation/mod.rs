//! Pure business-rule calculations.
//!
//! Every function in this module is deterministic and side-effect free:
//! salary resolution, leave day counting, balance aggregation, attendance
//! rollups, and the payroll computation itself. Stores and HTTP handlers
//! call in here; nothing here touches storage or I/O.

pub mod attendance;
pub mod base_salary;
pub mod day_count;
pub mod leave_balance;
pub mod payroll;
pub mod unpaid_leave;

pub use attendance::{overtime_hourly_rate, resolve_period_attendance, PeriodAttendance};
pub use base_salary::effective_base_salary;
pub use day_count::derive_day_count;
pub use leave_balance::{leave_balance, LeaveBalance};
pub use payroll::{calculate_payroll, income_tax, PayrollInput};
pub use unpaid_leave::unpaid_days_in_period;
