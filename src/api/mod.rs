//! HTTP API module for the HR engine.
//!
//! This module provides the REST endpoints over the payroll and leave
//! rules: stateless calculation, batch generation, leave lifecycle,
//! attendance entry, and the administrative record surfaces.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AccountRequest, AnnouncementRequest, AttendanceEntryRequest, AttendanceSaveRequest,
    CalculateRequest, CandidateRequest, CandidateStatusRequest, CreateLeaveRequest,
    EmployeeRequest, LeaveListQuery, MarkPaidRequest, PasswordChangeRequest, PayrollListQuery,
    PeriodRequest,
};
pub use response::{
    AccountResponse, ApiError, ApiErrorResponse, AttendanceSaveResponse, GenerateResponse,
    LeaveBalanceResponse,
};
pub use state::AppState;
