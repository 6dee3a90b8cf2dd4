//! Request types for the HR engine API.
//!
//! This module defines the JSON request structures for the HTTP
//! endpoints. Reference data (positions, leave types, rates) is loaded
//! from configuration; these types only carry operational input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceRecord, AttendanceStatus, CandidateStatus, Employee, LeaveStatus, Priority, Role,
};

/// Request body for the stateless `/payroll/calculate` endpoint.
///
/// The caller supplies everything the calculator needs; nothing is read
/// from or written to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// The employee the breakdown is for.
    pub employee_id: String,
    /// Payroll year.
    pub year: i32,
    /// Payroll month (1-12).
    pub month: u32,
    /// Monthly base salary. Required; the stateless endpoint has no
    /// employee record to resolve one from.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Overtime hours worked in the period.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Hourly overtime rate. Derived from the base salary and the
    /// configured conventions when omitted.
    #[serde(default)]
    pub overtime_hourly_rate: Option<Decimal>,
    /// Approved unpaid-leave days in the period.
    #[serde(default)]
    pub unpaid_days: u32,
    /// Named additions other than overtime pay.
    #[serde(default)]
    pub additions: Vec<AdditionRequest>,
}

/// A named addition in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionRequest {
    /// Label shown on the breakdown (e.g. "meal_allowance").
    pub name: String,
    /// Amount added to the pay, non-negative.
    pub amount: Decimal,
}

/// Request body for `/payroll/generate` and `/payroll/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Payroll year.
    pub year: i32,
    /// Payroll month (1-12).
    pub month: u32,
}

/// Request body for marking a payroll record paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    /// The date payment was made.
    pub payment_date: NaiveDate,
}

/// Request body for creating a leave request.
///
/// `day_count` may be omitted; it is then derived from the inclusive
/// date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    /// The employee requesting leave.
    pub employee_id: String,
    /// Leave type code from the reference data (e.g. "annual").
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Explicit day count; derived from the range when omitted.
    #[serde(default)]
    pub day_count: Option<u32>,
}

/// Query parameters for listing leave requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveListQuery {
    /// Restrict to one status.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Query parameters for listing payroll records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollListQuery {
    /// Restrict to one year; must be paired with `month`.
    #[serde(default)]
    pub year: Option<i32>,
    /// Restrict to one month; must be paired with `year`.
    #[serde(default)]
    pub month: Option<u32>,
    /// Restrict to one employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Request body for the attendance save endpoint: all entries for one
/// date, upserted in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSaveRequest {
    /// The date all entries apply to.
    pub date: NaiveDate,
    /// One entry per employee.
    pub entries: Vec<AttendanceEntryRequest>,
}

/// One employee's attendance entry for the request date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntryRequest {
    /// The employee the entry is for.
    pub employee_id: String,
    /// Attendance status; defaults to a normal working day.
    #[serde(default = "default_attendance_status")]
    pub status: AttendanceStatus,
    /// Overtime hours, in quarter-hour steps.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

fn default_attendance_status() -> AttendanceStatus {
    AttendanceStatus::Normal
}

impl AttendanceEntryRequest {
    /// Converts the entry into a record for the given date.
    pub fn into_record(self, date: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: self.employee_id,
            date,
            status: self.status,
            overtime_hours: self.overtime_hours,
            note: self.note,
        }
    }
}

/// Request body for creating or replacing an employee record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique employee identifier.
    pub id: String,
    /// National identity number.
    pub national_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Employment start date.
    pub hire_date: NaiveDate,
    /// Department label, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// Position code from the reference data.
    pub position_code: String,
    /// Seniority tier, starting at 1.
    #[serde(default = "default_tier")]
    pub tier: u32,
    /// Manual salary override; wins over position and tier when set.
    #[serde(default)]
    pub override_salary: Option<Decimal>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Whether the employee is on the active roster; defaults to true.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_tier() -> u32 {
    1
}

fn default_active() -> bool {
    true
}

impl From<EmployeeRequest> for Employee {
    fn from(request: EmployeeRequest) -> Self {
        Employee {
            id: request.id,
            national_id: request.national_id,
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
            hire_date: request.hire_date,
            department: request.department,
            position_code: request.position_code,
            tier: request.tier,
            override_salary: request.override_salary,
            phone: request.phone,
            email: request.email,
            address: request.address,
            active: request.active,
        }
    }
}

/// Request body for creating a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The position applied for.
    pub position_code: String,
    /// Date the application arrived.
    pub application_date: NaiveDate,
    /// Scheduled interview date, if any.
    #[serde(default)]
    pub interview_date: Option<NaiveDate>,
    /// Free-form recruiter notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for updating a candidate's pipeline status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateStatusRequest {
    /// The new pipeline status.
    pub status: CandidateStatus,
}

/// Request body for publishing an announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementRequest {
    /// Headline.
    pub title: String,
    /// Announcement text.
    pub body: String,
    /// Display priority; defaults to normal.
    #[serde(default = "default_priority")]
    pub priority: Priority,
    /// Last day the announcement is shown (inclusive); never expires
    /// when omitted.
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    /// Who published it.
    pub author: String,
}

fn default_priority() -> Priority {
    Priority::Normal
}

/// Request body for creating a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRequest {
    /// Login name.
    pub username: String,
    /// Opaque credential hash; hashing happens outside this engine.
    pub password_hash: String,
    /// The account's role.
    pub role: Role,
    /// The linked employee, if any.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Request body for completing a password change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    /// The new credential hash.
    pub password_hash: String,
}
