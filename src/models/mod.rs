//! Core data models for the payroll and leave rule engine.
//!
//! This module contains all the domain records used throughout the engine.

mod account;
mod announcement;
mod attendance;
mod candidate;
mod employee;
mod leave;
mod payroll;
mod period;

pub use account::{Role, UserAccount};
pub use announcement::{Announcement, Priority};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use candidate::{Candidate, CandidateStatus};
pub use employee::Employee;
pub use leave::{LeaveRequest, LeaveStatus};
pub use payroll::{Addition, PayrollBreakdown, PayrollRecord};
pub use period::PayPeriod;
