//! HTTP request handlers for the HR engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! The caller's role arrives in the `x-role` header and, for employee
//! callers, the linked employee id in `x-employee-id`; session handling
//! itself lives outside this engine.

use std::str::FromStr;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{authorize, is_allowed, Action, Resource};
use crate::batch::{generate_period, preview_period, PreviewOutcome};
use crate::calculation::{
    calculate_payroll, derive_day_count, leave_balance, overtime_hourly_rate, PayrollInput,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Addition, Announcement, Candidate, CandidateStatus, Employee, LeaveRequest, LeaveStatus,
    PayPeriod, PayrollBreakdown, PayrollRecord, Role, UserAccount,
};

use super::request::{
    AccountRequest, AnnouncementRequest, AttendanceSaveRequest, CalculateRequest,
    CandidateRequest, CandidateStatusRequest, CreateLeaveRequest, EmployeeRequest, LeaveListQuery,
    MarkPaidRequest, PasswordChangeRequest, PayrollListQuery, PeriodRequest,
};
use super::response::{
    AccountResponse, ApiError, ApiErrorResponse, AttendanceSaveResponse, GenerateResponse,
    LeaveBalanceResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", get(get_employee))
        .route("/payroll/calculate", post(calculate))
        .route("/payroll/generate", post(generate))
        .route("/payroll/preview", post(preview))
        .route("/payroll", get(list_payroll))
        .route("/payroll/:employee_id/:year/:month/pay", post(mark_paid))
        .route(
            "/leave-balance/:employee_id/:leave_type/:year",
            get(get_leave_balance),
        )
        .route("/leaves", get(list_leaves).post(create_leave))
        .route("/leaves/:id/approve", post(approve_leave))
        .route("/leaves/:id/reject", post(reject_leave))
        .route("/leaves/:id/cancel", post(cancel_leave))
        .route("/attendance", post(save_attendance))
        .route(
            "/announcements",
            get(list_announcements).post(create_announcement),
        )
        .route("/candidates", get(list_candidates).post(create_candidate))
        .route("/candidates/:id/status", put(update_candidate_status))
        .route("/accounts", post(create_account))
        .route("/accounts/:username", get(get_account))
        .route("/accounts/:username/password", post(change_password))
        .with_state(state)
}

/// Extracts the caller's role from the `x-role` header.
fn caller_role(headers: &HeaderMap) -> Result<Role, ApiErrorResponse> {
    let value = headers
        .get("x-role")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiErrorResponse::bad_request("x-role header is required"))?;
    Role::from_str(value)
        .map_err(|_| ApiErrorResponse::bad_request(format!("unknown role '{}'", value)))
}

/// Extracts the caller's linked employee id, if supplied.
fn caller_employee(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-employee-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Authorizes a read of `target`'s records: either the role may read
/// anyone's, or it may read its own and the target is the caller.
fn authorize_read(
    role: Role,
    resource: Resource,
    own_employee: Option<&str>,
    target: Option<&str>,
) -> EngineResult<()> {
    if is_allowed(role, resource, Action::ReadAny) {
        return Ok(());
    }
    if is_allowed(role, resource, Action::ReadOwn) {
        if let (Some(own), Some(target)) = (own_employee, target) {
            if own == target {
                return Ok(());
            }
        }
    }
    Err(EngineError::Forbidden {
        role: role.as_str().to_string(),
        resource: resource.as_str().to_string(),
        action: Action::ReadAny.as_str().to_string(),
    })
}

/// Unwraps a JSON body, turning extraction failures into 400 responses.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::new(StatusCode::BAD_REQUEST, error))
        }
    }
}

// --- Employees ---

async fn create_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Result<Json<Employee>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Employees, Action::CreateAny)?;
    let request = parse_body(payload)?;

    if request.id.trim().is_empty() {
        return Err(ApiErrorResponse::bad_request("employee id must not be empty"));
    }
    if request.tier == 0 {
        return Err(ApiErrorResponse::bad_request("tier must be at least 1"));
    }
    let employee: Employee = request.into();
    // Without an override the position must resolve a base salary.
    if !employee.has_override() {
        state.config().get_position(&employee.position_code)?;
    }

    state.store().upsert_employee(employee.clone()).await;
    info!(
        employee_id = %employee.id,
        name = %employee.full_name(),
        "Employee record saved"
    );
    Ok(Json(employee))
}

async fn list_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Employee>>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Employees, Action::ReadAny)?;
    Ok(Json(state.store().list_employees().await))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Employee>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    let own = caller_employee(&headers);
    authorize_read(role, Resource::Employees, own.as_deref(), Some(&id))?;
    Ok(Json(state.store().get_employee(&id).await?))
}

// --- Payroll ---

/// Handler for the stateless POST /payroll/calculate endpoint.
///
/// Computes a breakdown entirely from the supplied inputs; nothing is
/// read from or written to the store.
async fn calculate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<PayrollBreakdown>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Payroll, Action::CreateAny)?;
    let request = parse_body(payload)?;

    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing calculation request"
    );

    let period = PayPeriod::new(request.year, request.month)?;
    let base_salary = request
        .base_salary
        .ok_or_else(|| EngineError::MissingBaseSalary {
            employee_id: request.employee_id.clone(),
        })?;
    let rates = state.config().rates();
    let hourly_rate = request
        .overtime_hourly_rate
        .unwrap_or_else(|| overtime_hourly_rate(base_salary, rates));

    let input = PayrollInput {
        employee_id: request.employee_id,
        period,
        base_salary,
        overtime_hours: request.overtime_hours,
        overtime_hourly_rate: hourly_rate,
        unpaid_days: request.unpaid_days,
        additions: request
            .additions
            .into_iter()
            .map(|a| Addition {
                name: a.name,
                amount: a.amount,
            })
            .collect(),
    };

    let start_time = Instant::now();
    match calculate_payroll(&input, rates) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %breakdown.employee_id,
                net = %breakdown.net,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            Ok(Json(breakdown))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            Err(err.into())
        }
    }
}

async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Payroll, Action::CreateAny)?;
    let request = parse_body(payload)?;
    let period = PayPeriod::new(request.year, request.month)?;

    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period = %period, "Running payroll batch");

    let outcome = generate_period(state.store(), state.config(), period).await;
    if !outcome.errors.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            period = %period,
            failed = outcome.errors.len(),
            "Payroll batch completed with per-employee errors"
        );
    }
    info!(
        correlation_id = %correlation_id,
        period = %period,
        created = outcome.records.len(),
        "Payroll batch finished"
    );

    Ok(Json(GenerateResponse {
        period,
        created_count: outcome.records.len(),
        errors: outcome.errors,
    }))
}

async fn preview(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Result<Json<PreviewOutcome>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Payroll, Action::ReadAny)?;
    let request = parse_body(payload)?;
    let period = PayPeriod::new(request.year, request.month)?;

    Ok(Json(preview_period(state.store(), state.config(), period).await))
}

async fn list_payroll(
    State(state): State<AppState>,
    Query(query): Query<PayrollListQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<PayrollRecord>>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    let own = caller_employee(&headers);
    authorize_read(
        role,
        Resource::Payroll,
        own.as_deref(),
        query.employee_id.as_deref(),
    )?;

    let records = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            let period = PayPeriod::new(year, month)?;
            state.store().list_payroll_for_period(period).await
        }
        (None, None) => match &query.employee_id {
            Some(employee_id) => state.store().list_payroll_for_employee(employee_id).await,
            None => state.store().list_payroll().await,
        },
        _ => {
            return Err(ApiErrorResponse::bad_request(
                "year and month must be supplied together",
            ));
        }
    };

    let records = match &query.employee_id {
        Some(employee_id) => records
            .into_iter()
            .filter(|r| &r.breakdown.employee_id == employee_id)
            .collect(),
        None => records,
    };
    Ok(Json(records))
}

async fn mark_paid(
    State(state): State<AppState>,
    Path((employee_id, year, month)): Path<(String, i32, u32)>,
    headers: HeaderMap,
    payload: Result<Json<MarkPaidRequest>, JsonRejection>,
) -> Result<Json<PayrollRecord>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Payroll, Action::UpdateAny)?;
    let request = parse_body(payload)?;
    let period = PayPeriod::new(year, month)?;

    let record = state
        .store()
        .mark_payroll_paid(&employee_id, period, request.payment_date)
        .await?;
    info!(employee_id = %employee_id, period = %period, "Payroll marked paid");
    Ok(Json(record))
}

// --- Leave ---

async fn get_leave_balance(
    State(state): State<AppState>,
    Path((employee_id, leave_type, year)): Path<(String, String, i32)>,
    headers: HeaderMap,
) -> Result<Json<LeaveBalanceResponse>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    let own = caller_employee(&headers);
    authorize_read(role, Resource::LeaveRequests, own.as_deref(), Some(&employee_id))?;

    state.store().get_employee(&employee_id).await?;
    let entitlement = state
        .config()
        .get_leave_type(&leave_type)?
        .annual_entitlement_days;
    let requests = state.store().list_leave_requests_for(&employee_id).await;
    let balance = leave_balance(&leave_type, entitlement, year, &requests);

    Ok(Json(LeaveBalanceResponse {
        employee_id,
        leave_type,
        year,
        entitlement_days: entitlement,
        used_days: balance.used_days,
        remaining_days: balance.remaining_days,
    }))
}

async fn create_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateLeaveRequest>, JsonRejection>,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    let own = caller_employee(&headers);
    let request = parse_body(payload)?;

    if !is_allowed(role, Resource::LeaveRequests, Action::CreateAny)
        && !(is_allowed(role, Resource::LeaveRequests, Action::CreateOwn)
            && own.as_deref() == Some(request.employee_id.as_str()))
    {
        return Err(EngineError::Forbidden {
            role: role.as_str().to_string(),
            resource: Resource::LeaveRequests.as_str().to_string(),
            action: Action::CreateAny.as_str().to_string(),
        }
        .into());
    }

    state.store().get_employee(&request.employee_id).await?;
    let leave_type = state.config().get_leave_type(&request.leave_type)?;
    let day_count = derive_day_count(request.start_date, request.end_date, request.day_count)?;
    if let Some(max_days) = leave_type.max_days {
        if day_count > max_days {
            return Err(EngineError::Validation {
                field: "day_count".to_string(),
                message: format!(
                    "{} days exceeds the {} limit for {}",
                    day_count, max_days, request.leave_type
                ),
            }
            .into());
        }
    }

    let leave_request = LeaveRequest {
        id: Uuid::new_v4(),
        employee_id: request.employee_id,
        leave_type: request.leave_type,
        start_date: request.start_date,
        end_date: request.end_date,
        day_count,
        status: LeaveStatus::Pending,
    };
    state.store().insert_leave_request(leave_request.clone()).await;
    info!(
        leave_request_id = %leave_request.id,
        employee_id = %leave_request.employee_id,
        day_count,
        "Leave request created"
    );
    Ok(Json(leave_request))
}

async fn list_leaves(
    State(state): State<AppState>,
    Query(query): Query<LeaveListQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<LeaveRequest>>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    let own = caller_employee(&headers);
    authorize_read(
        role,
        Resource::LeaveRequests,
        own.as_deref(),
        query.employee_id.as_deref(),
    )?;

    let requests = match &query.employee_id {
        Some(employee_id) => state.store().list_leave_requests_for(employee_id).await,
        None => state.store().list_leave_requests().await,
    };
    let requests = match query.status {
        Some(status) => requests.into_iter().filter(|r| r.status == status).collect(),
        None => requests,
    };
    Ok(Json(requests))
}

async fn approve_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::LeaveRequests, Action::UpdateAny)?;

    let mut request = state.store().get_leave_request(id).await?;
    request.approve()?;
    state.store().update_leave_request(request.clone()).await?;
    Ok(Json(request))
}

async fn reject_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::LeaveRequests, Action::UpdateAny)?;

    let mut request = state.store().get_leave_request(id).await?;
    request.reject()?;
    state.store().update_leave_request(request.clone()).await?;
    Ok(Json(request))
}

async fn cancel_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<LeaveRequest>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    let own = caller_employee(&headers);

    let mut request = state.store().get_leave_request(id).await?;
    if !is_allowed(role, Resource::LeaveRequests, Action::UpdateAny)
        && !(is_allowed(role, Resource::LeaveRequests, Action::CancelOwn)
            && own.as_deref() == Some(request.employee_id.as_str()))
    {
        return Err(EngineError::Forbidden {
            role: role.as_str().to_string(),
            resource: Resource::LeaveRequests.as_str().to_string(),
            action: Action::CancelOwn.as_str().to_string(),
        }
        .into());
    }

    request.cancel()?;
    state.store().update_leave_request(request.clone()).await?;
    Ok(Json(request))
}

// --- Attendance ---

/// Handler for POST /attendance: upserts all entries for one date.
async fn save_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AttendanceSaveRequest>, JsonRejection>,
) -> Result<Json<AttendanceSaveResponse>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Attendance, Action::CreateAny)?;
    let request = parse_body(payload)?;

    let records: Vec<_> = request
        .entries
        .into_iter()
        .map(|entry| entry.into_record(request.date))
        .collect();
    // Validate the whole batch before writing anything.
    for record in &records {
        record.validate()?;
    }

    let mut created = 0;
    let mut updated = 0;
    for record in records {
        if state.store().upsert_attendance(record).await {
            created += 1;
        } else {
            updated += 1;
        }
    }

    Ok(Json(AttendanceSaveResponse {
        date: request.date,
        created,
        updated,
    }))
}

// --- Announcements ---

async fn list_announcements(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Announcement>>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Announcements, Action::ReadAny)?;
    Ok(Json(state.store().list_active_announcements().await))
}

async fn create_announcement(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AnnouncementRequest>, JsonRejection>,
) -> Result<Json<Announcement>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Announcements, Action::CreateAny)?;
    let request = parse_body(payload)?;

    if request.title.trim().is_empty() {
        return Err(ApiErrorResponse::bad_request("title must not be empty"));
    }

    let announcement = Announcement {
        id: Uuid::new_v4(),
        title: request.title,
        body: request.body,
        priority: request.priority,
        expires_on: request.expires_on,
        author: request.author,
        published_at: Utc::now(),
    };
    state.store().insert_announcement(announcement.clone()).await;
    Ok(Json(announcement))
}

// --- Candidates ---

async fn list_candidates(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Candidate>>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Candidates, Action::ReadAny)?;
    Ok(Json(state.store().list_candidates().await))
}

async fn create_candidate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CandidateRequest>, JsonRejection>,
) -> Result<Json<Candidate>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Candidates, Action::CreateAny)?;
    let request = parse_body(payload)?;

    let candidate = Candidate {
        id: Uuid::new_v4(),
        first_name: request.first_name,
        last_name: request.last_name,
        position_code: request.position_code,
        application_date: request.application_date,
        interview_date: request.interview_date,
        status: CandidateStatus::Received,
        notes: request.notes,
    };
    state.store().insert_candidate(candidate.clone()).await;
    Ok(Json(candidate))
}

async fn update_candidate_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    payload: Result<Json<CandidateStatusRequest>, JsonRejection>,
) -> Result<Json<Candidate>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Candidates, Action::UpdateAny)?;
    let request = parse_body(payload)?;

    let mut candidate = state
        .store()
        .get_candidate(id)
        .await
        .ok_or_else(|| ApiErrorResponse::not_found("CANDIDATE_NOT_FOUND", format!("Candidate not found: {}", id)))?;
    candidate.status = request.status;
    state.store().update_candidate(candidate.clone()).await;
    Ok(Json(candidate))
}

// --- Accounts ---

async fn create_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Accounts, Action::CreateAny)?;
    let request = parse_body(payload)?;

    if request.username.trim().is_empty() {
        return Err(ApiErrorResponse::bad_request("username must not be empty"));
    }

    let account = UserAccount {
        id: Uuid::new_v4(),
        username: request.username,
        password_hash: request.password_hash,
        role: request.role,
        employee_id: request.employee_id,
        first_login: true,
        active: true,
        last_login: None,
    };
    state.store().upsert_account(account.clone()).await;
    Ok(Json(account_view(&account)))
}

async fn get_account(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Result<Json<AccountResponse>, ApiErrorResponse> {
    let role = caller_role(&headers)?;
    authorize(role, Resource::Accounts, Action::ReadAny)?;

    let account = state
        .store()
        .get_account(&username)
        .await
        .ok_or_else(|| account_not_found(&username))?;
    Ok(Json(account_view(&account)))
}

/// Completes the forced first-login password change. The route is
/// self-service: the caller's identity is established outside this
/// engine, so no role gate applies beyond a valid `x-role` header.
async fn change_password(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<PasswordChangeRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiErrorResponse> {
    caller_role(&headers)?;
    let request = parse_body(payload)?;

    let mut account = state
        .store()
        .get_account(&username)
        .await
        .ok_or_else(|| account_not_found(&username))?;
    account.password_changed(request.password_hash);
    state.store().upsert_account(account.clone()).await;
    info!(username = %username, "Password change recorded");
    Ok(Json(account_view(&account)))
}

fn account_not_found(username: &str) -> ApiErrorResponse {
    ApiErrorResponse::not_found("ACCOUNT_NOT_FOUND", format!("Account not found: {}", username))
}

fn account_view(account: &UserAccount) -> AccountResponse {
    AccountResponse {
        username: account.username.clone(),
        role: account.role,
        employee_id: account.employee_id.clone(),
        requires_password_change: account.requires_password_change(),
        active: account.active,
    }
}
