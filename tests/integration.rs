//! Integration tests for the HR rule engine API.
//!
//! This suite drives the full HTTP surface:
//! - Payroll batch generation, preview, and idempotent regeneration
//! - Stateless payroll calculation
//! - Leave request lifecycle and balance accounting
//! - Attendance entry and overtime flow-through
//! - Role-based access control
//! - Announcements, candidates, and account management

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use bordro_engine::api::{create_router, AppState};
use bordro_engine::calculation::{calculate_payroll, derive_day_count, leave_balance, PayrollInput};
use bordro_engine::config::ConfigLoader;
use bordro_engine::models::{Employee, LeaveRequest, LeaveStatus, PayPeriod};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/bordro").expect("Failed to load config");
    AppState::new(config)
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn test_employee(id: &str, position: &str, tier: u32) -> Employee {
    Employee {
        id: id.to_string(),
        national_id: "12345678901".to_string(),
        first_name: "Ayşe".to_string(),
        last_name: "Yılmaz".to_string(),
        birth_date: date("1990-01-15"),
        hire_date: date("2021-06-01"),
        department: Some("engineering".to_string()),
        position_code: position.to_string(),
        tier,
        override_salary: None,
        phone: None,
        email: None,
        address: None,
        active: true,
    }
}

/// Sends a request with the given role and optional caller employee id,
/// returning the status and parsed JSON body.
async fn send(
    router: Router,
    method: &str,
    uri: &str,
    role: &str,
    caller: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-role", role);
    if let Some(employee_id) = caller {
        builder = builder.header("x-employee-id", employee_id);
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// Payroll batch
// =============================================================================

#[tokio::test]
async fn test_generate_covers_all_active_employees() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    state
        .store()
        .upsert_employee(test_employee("emp_002", "accountant", 2))
        .await;

    let body = json!({"year": 2024, "month": 6});
    let (status, response) = send(
        create_router(state.clone()),
        "POST",
        "/payroll/generate",
        "admin",
        None,
        Some(body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["created_count"], 2);
    assert_eq!(response["errors"].as_array().unwrap().len(), 0);

    let (status, records) = send(
        create_router(state),
        "GET",
        "/payroll?year=2024&month=6",
        "admin",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    // Accountant tier 2: 25,000 + 15,000.
    assert_eq!(records[1]["breakdown"]["gross"], "40000.00");
    assert_eq!(records[1]["paid"], false);
}

#[tokio::test]
async fn test_one_bad_employee_reported_not_fatal() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    state
        .store()
        .upsert_employee(test_employee("emp_002", "astronaut", 1))
        .await;
    state
        .store()
        .upsert_employee(test_employee("emp_003", "hr_specialist", 1))
        .await;

    let (status, response) = send(
        create_router(state),
        "POST",
        "/payroll/generate",
        "admin",
        None,
        Some(json!({"year": 2024, "month": 6})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["created_count"], 2);
    let errors = response["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["employee_id"], "emp_002");
    assert!(errors[0]["reason"].as_str().unwrap().contains("astronaut"));
}

#[tokio::test]
async fn test_regeneration_keeps_one_record_per_employee() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;

    for _ in 0..3 {
        let (status, response) = send(
            create_router(state.clone()),
            "POST",
            "/payroll/generate",
            "admin",
            None,
            Some(json!({"year": 2024, "month": 6})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["created_count"], 1);
    }

    let period = PayPeriod::new(2024, 6).unwrap();
    assert_eq!(state.store().list_payroll_for_period(period).await.len(), 1);
}

#[tokio::test]
async fn test_preview_returns_breakdowns_without_persisting() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;

    let (status, response) = send(
        create_router(state.clone()),
        "POST",
        "/payroll/preview",
        "admin",
        None,
        Some(json!({"year": 2024, "month": 6})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = response["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["gross"], "30000.00");

    let period = PayPeriod::new(2024, 6).unwrap();
    assert!(state.store().list_payroll_for_period(period).await.is_empty());
}

#[tokio::test]
async fn test_overtime_and_unpaid_leave_reach_the_breakdown() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state.clone());

    // 4 overtime hours on one day.
    let (status, _) = send(
        router.clone(),
        "POST",
        "/attendance",
        "admin",
        None,
        Some(json!({
            "date": "2024-06-10",
            "entries": [
                {"employee_id": "emp_001", "overtime_hours": "4"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Two approved unpaid-leave days.
    let (status, leave) = send(
        router.clone(),
        "POST",
        "/leaves",
        "admin",
        None,
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "unpaid",
            "start_date": "2024-06-17",
            "end_date": "2024-06-18"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let leave_id = leave["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        router.clone(),
        "POST",
        &format!("/leaves/{}/approve", leave_id),
        "admin",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, response) = send(
        router,
        "POST",
        "/payroll/preview",
        "admin",
        None,
        Some(json!({"year": 2024, "month": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let item = &response["items"].as_array().unwrap()[0];
    // 30,000 / (30 x 8) x 1.5 = 187.50/h; 4 hours.
    assert_eq!(item["overtime_pay"], "750.00");
    assert_eq!(item["unpaid_days"], 2);
    // Daily rate 1,000 x 2 days.
    assert_eq!(item["unpaid_deduction"], "2000.00");

    // Net identity holds on the wire values too.
    let gross = decimal(item["gross"].as_str().unwrap());
    let additions = decimal(item["total_additions"].as_str().unwrap());
    let deductions = decimal(item["total_deductions"].as_str().unwrap());
    let net = decimal(item["net"].as_str().unwrap());
    assert_eq!(net, gross + additions - deductions);
}

#[tokio::test]
async fn test_mark_paid_flow() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state.clone());

    send(
        router.clone(),
        "POST",
        "/payroll/generate",
        "admin",
        None,
        Some(json!({"year": 2024, "month": 6})),
    )
    .await;

    let (status, record) = send(
        router.clone(),
        "POST",
        "/payroll/emp_001/2024/6/pay",
        "admin",
        None,
        Some(json!({"payment_date": "2024-07-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["paid"], true);
    assert_eq!(record["payment_date"], "2024-07-01");

    // Unknown period 404s.
    let (status, error) = send(
        router,
        "POST",
        "/payroll/emp_001/2024/7/pay",
        "admin",
        None,
        Some(json!({"payment_date": "2024-08-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "PAYROLL_NOT_FOUND");
}

#[tokio::test]
async fn test_override_salary_wins_in_batch() {
    let state = create_test_state();
    let mut employee = test_employee("emp_001", "software_engineer", 3);
    employee.override_salary = Some(decimal("45000"));
    state.store().upsert_employee(employee).await;

    let (status, response) = send(
        create_router(state),
        "POST",
        "/payroll/preview",
        "admin",
        None,
        Some(json!({"year": 2024, "month": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Tier 3 would compute 60,000; the override wins.
    assert_eq!(response["items"][0]["gross"], "45000.00");
}

// =============================================================================
// Leave lifecycle and balance
// =============================================================================

#[tokio::test]
async fn test_leave_day_count_derived_inclusively() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state);

    let (status, leave) = send(
        router.clone(),
        "POST",
        "/leaves",
        "employee",
        Some("emp_001"),
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "annual",
            "start_date": "2024-06-03",
            "end_date": "2024-06-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leave["day_count"], 3);
    assert_eq!(leave["status"], "pending");

    // Single-day request counts as 1.
    let (status, leave) = send(
        router,
        "POST",
        "/leaves",
        "employee",
        Some("emp_001"),
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "annual",
            "start_date": "2024-07-01",
            "end_date": "2024-07-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leave["day_count"], 1);
}

#[tokio::test]
async fn test_leave_rejects_inverted_range_and_unknown_type() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state);

    let (status, error) = send(
        router.clone(),
        "POST",
        "/leaves",
        "admin",
        None,
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "annual",
            "start_date": "2024-06-10",
            "end_date": "2024-06-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_DATE_RANGE");

    let (status, error) = send(
        router,
        "POST",
        "/leaves",
        "admin",
        None,
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "sabbatical",
            "start_date": "2024-06-03",
            "end_date": "2024-06-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "LEAVE_TYPE_NOT_FOUND");
}

#[tokio::test]
async fn test_leave_type_day_limit_enforced() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;

    // Sick leave caps at 5 consecutive days.
    let (status, error) = send(
        create_router(state),
        "POST",
        "/leaves",
        "admin",
        None,
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "sick",
            "start_date": "2024-06-03",
            "end_date": "2024-06-10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_approved_requests_are_terminal() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state);

    let (_, leave) = send(
        router.clone(),
        "POST",
        "/leaves",
        "admin",
        None,
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "annual",
            "start_date": "2024-06-03",
            "end_date": "2024-06-05"
        })),
    )
    .await;
    let leave_id = leave["id"].as_str().unwrap().to_string();

    let (status, leave) = send(
        router.clone(),
        "POST",
        &format!("/leaves/{}/approve", leave_id),
        "admin",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leave["status"], "approved");

    // A second transition is invalid.
    let (status, error) = send(
        router,
        "POST",
        &format!("/leaves/{}/reject", leave_id),
        "admin",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_employee_cancels_own_pending_request_only() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state);

    let (_, leave) = send(
        router.clone(),
        "POST",
        "/leaves",
        "employee",
        Some("emp_001"),
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "annual",
            "start_date": "2024-06-03",
            "end_date": "2024-06-05"
        })),
    )
    .await;
    let leave_id = leave["id"].as_str().unwrap().to_string();

    // A different employee may not cancel it.
    let (status, _) = send(
        router.clone(),
        "POST",
        &format!("/leaves/{}/cancel", leave_id),
        "employee",
        Some("emp_999"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The owner may.
    let (status, leave) = send(
        router,
        "POST",
        &format!("/leaves/{}/cancel", leave_id),
        "employee",
        Some("emp_001"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leave["status"], "cancelled");
}

#[tokio::test]
async fn test_employee_cannot_create_leave_for_others() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_002", "accountant", 1))
        .await;

    let (status, _) = send(
        create_router(state),
        "POST",
        "/leaves",
        "employee",
        Some("emp_001"),
        Some(json!({
            "employee_id": "emp_002",
            "leave_type": "annual",
            "start_date": "2024-06-03",
            "end_date": "2024-06-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_balance_counts_pending_and_approved_only() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state.clone());

    // 3 approved + 2 pending + 4 rejected days of annual leave in 2024.
    let requests = [
        ("2024-03-04", "2024-03-06", "approve"),
        ("2024-05-06", "2024-05-07", "none"),
        ("2024-08-05", "2024-08-08", "reject"),
    ];
    for (start, end, action) in requests {
        let (_, leave) = send(
            router.clone(),
            "POST",
            "/leaves",
            "admin",
            None,
            Some(json!({
                "employee_id": "emp_001",
                "leave_type": "annual",
                "start_date": start,
                "end_date": end
            })),
        )
        .await;
        if action != "none" {
            let uri = format!("/leaves/{}/{}", leave["id"].as_str().unwrap(), action);
            send(router.clone(), "POST", &uri, "admin", None, None).await;
        }
    }

    let (status, balance) = send(
        router.clone(),
        "GET",
        "/leave-balance/emp_001/annual/2024",
        "employee",
        Some("emp_001"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["entitlement_days"], 14);
    assert_eq!(balance["used_days"], 5);
    assert_eq!(balance["remaining_days"], 9);

    // Another employee's balance is off limits.
    let (status, _) = send(
        router,
        "GET",
        "/leave-balance/emp_001/annual/2024",
        "employee",
        Some("emp_002"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_leave_listing_filters_by_status() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state);

    let (_, leave) = send(
        router.clone(),
        "POST",
        "/leaves",
        "admin",
        None,
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "annual",
            "start_date": "2024-06-03",
            "end_date": "2024-06-05"
        })),
    )
    .await;
    send(
        router.clone(),
        "POST",
        &format!("/leaves/{}/approve", leave["id"].as_str().unwrap()),
        "admin",
        None,
        None,
    )
    .await;
    send(
        router.clone(),
        "POST",
        "/leaves",
        "admin",
        None,
        Some(json!({
            "employee_id": "emp_001",
            "leave_type": "excused",
            "start_date": "2024-07-01",
            "end_date": "2024-07-01"
        })),
    )
    .await;

    let (status, approved) = send(
        router,
        "GET",
        "/leaves?status=approved",
        "admin",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let approved = approved.as_array().unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0]["leave_type"], "annual");
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn test_attendance_second_save_overwrites() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state.clone());

    let (status, response) = send(
        router.clone(),
        "POST",
        "/attendance",
        "admin",
        None,
        Some(json!({
            "date": "2024-06-10",
            "entries": [{"employee_id": "emp_001", "overtime_hours": "2"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["created"], 1);
    assert_eq!(response["updated"], 0);

    let (status, response) = send(
        router,
        "POST",
        "/attendance",
        "admin",
        None,
        Some(json!({
            "date": "2024-06-10",
            "entries": [{"employee_id": "emp_001", "overtime_hours": "3.5"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["created"], 0);
    assert_eq!(response["updated"], 1);

    let period = PayPeriod::new(2024, 6).unwrap();
    let records = state.store().list_attendance_for("emp_001", period).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].overtime_hours, decimal("3.5"));
}

#[tokio::test]
async fn test_attendance_rejects_off_grid_overtime() {
    let router = create_router(create_test_state());

    // Overtime must land on a quarter-hour.
    let (status, error) = send(
        router,
        "POST",
        "/attendance",
        "admin",
        None,
        Some(json!({
            "date": "2024-06-10",
            "entries": [{"employee_id": "emp_001", "overtime_hours": "1.1"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Announcements, candidates, accounts
// =============================================================================

#[tokio::test]
async fn test_expired_announcements_filtered_from_listing() {
    let state = create_test_state();
    let router = create_router(state);

    send(
        router.clone(),
        "POST",
        "/announcements",
        "admin",
        None,
        Some(json!({
            "title": "Office closed",
            "body": "The office is closed for the holiday.",
            "author": "hr",
            "expires_on": "2020-01-01"
        })),
    )
    .await;
    send(
        router.clone(),
        "POST",
        "/announcements",
        "admin",
        None,
        Some(json!({
            "title": "New cafeteria menu",
            "body": "The cafeteria menu changes next week.",
            "author": "hr",
            "priority": "high"
        })),
    )
    .await;

    // Employees can read the listing; only the unexpired entry shows.
    let (status, listing) = send(router, "GET", "/announcements", "employee", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let listing = listing.as_array().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0]["title"], "New cafeteria menu");
    assert_eq!(listing[0]["priority"], "high");
}

#[tokio::test]
async fn test_candidate_pipeline() {
    let router = create_router(create_test_state());

    // Employees have no access to recruitment data.
    let (status, _) = send(router.clone(), "GET", "/candidates", "employee", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, candidate) = send(
        router.clone(),
        "POST",
        "/candidates",
        "admin",
        None,
        Some(json!({
            "first_name": "Mehmet",
            "last_name": "Demir",
            "position_code": "accountant",
            "application_date": "2024-05-20"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(candidate["status"], "received");
    let id = candidate["id"].as_str().unwrap().to_string();

    let (status, candidate) = send(
        router.clone(),
        "PUT",
        &format!("/candidates/{}/status", id),
        "admin",
        None,
        Some(json!({"status": "interview"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(candidate["status"], "interview");

    let (status, error) = send(
        router,
        "PUT",
        &format!("/candidates/{}/status", uuid::Uuid::new_v4()),
        "admin",
        None,
        Some(json!({"status": "offer"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "CANDIDATE_NOT_FOUND");
}

#[tokio::test]
async fn test_first_login_gate_clears_after_password_change() {
    let router = create_router(create_test_state());

    let (status, account) = send(
        router.clone(),
        "POST",
        "/accounts",
        "admin",
        None,
        Some(json!({
            "username": "ayilmaz",
            "password_hash": "hash-1",
            "role": "employee",
            "employee_id": "emp_001"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["requires_password_change"], true);
    // The credential hash never appears in responses.
    assert!(account.get("password_hash").is_none());

    let (status, account) = send(
        router.clone(),
        "POST",
        "/accounts/ayilmaz/password",
        "employee",
        None,
        Some(json!({"password_hash": "hash-2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["requires_password_change"], false);

    let (status, account) = send(
        router,
        "GET",
        "/accounts/ayilmaz",
        "admin",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["requires_password_change"], false);
}

// =============================================================================
// Access control across surfaces
// =============================================================================

#[tokio::test]
async fn test_employee_reads_own_payroll_only() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state.clone());

    send(
        router.clone(),
        "POST",
        "/payroll/generate",
        "admin",
        None,
        Some(json!({"year": 2024, "month": 6})),
    )
    .await;

    let (status, records) = send(
        router.clone(),
        "GET",
        "/payroll?employee_id=emp_001",
        "employee",
        Some("emp_001"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(records.as_array().unwrap().len(), 1);

    // No filter, or a filter for someone else, is forbidden.
    let (status, _) = send(
        router.clone(),
        "GET",
        "/payroll",
        "employee",
        Some("emp_001"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        router,
        "GET",
        "/payroll?employee_id=emp_002",
        "employee",
        Some("emp_001"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_employee_reads_own_record_via_employees_route() {
    let state = create_test_state();
    state
        .store()
        .upsert_employee(test_employee("emp_001", "software_engineer", 1))
        .await;
    let router = create_router(state);

    let (status, employee) = send(
        router.clone(),
        "GET",
        "/employees/emp_001",
        "employee",
        Some("emp_001"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(employee["id"], "emp_001");

    let (status, _) = send(
        router,
        "GET",
        "/employees/emp_001",
        "employee",
        Some("emp_002"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_employee_creation_validates_position() {
    let router = create_router(create_test_state());

    let mut body = serde_json::to_value(test_employee("emp_x", "astronaut", 1)).unwrap();
    body.as_object_mut().unwrap().remove("active");

    let (status, error) = send(
        router,
        "POST",
        "/employees",
        "admin",
        None,
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "POSITION_NOT_FOUND");
}

// =============================================================================
// Properties
// =============================================================================

fn base_payroll_input(base_salary: Decimal, unpaid_days: u32, overtime_hours: Decimal) -> PayrollInput {
    PayrollInput {
        employee_id: "emp_prop".to_string(),
        period: PayPeriod::new(2024, 6).unwrap(),
        base_salary,
        overtime_hours,
        overtime_hourly_rate: decimal("187.50"),
        unpaid_days,
        additions: vec![],
    }
}

proptest! {
    #[test]
    fn prop_day_count_is_at_least_one(
        start_offset in 0i64..3000,
        length in 0i64..60,
    ) {
        let start = date("2020-01-01") + chrono::Duration::days(start_offset);
        let end = start + chrono::Duration::days(length);
        let count = derive_day_count(start, end, None).unwrap();
        prop_assert!(count >= 1);
        prop_assert_eq!(count as i64, length + 1);
    }

    #[test]
    fn prop_net_identity_always_holds(
        base in 0u64..1_000_000,
        cents in 0u64..100,
        unpaid_days in 0u32..31,
        overtime_quarters in 0u32..200,
    ) {
        let base_salary = Decimal::from(base) + Decimal::new(cents as i64, 2);
        let overtime_hours = Decimal::new(overtime_quarters as i64 * 25, 2);
        let rates = ConfigLoader::load("./config/bordro").unwrap().rates().clone();

        let input = base_payroll_input(base_salary, unpaid_days, overtime_hours);
        let breakdown = calculate_payroll(&input, &rates).unwrap();

        prop_assert_eq!(
            breakdown.net,
            breakdown.gross + breakdown.total_additions - breakdown.total_deductions
        );
    }

    #[test]
    fn prop_calculator_is_deterministic(
        base in 0u64..1_000_000,
        unpaid_days in 0u32..31,
    ) {
        let rates = ConfigLoader::load("./config/bordro").unwrap().rates().clone();
        let input = base_payroll_input(Decimal::from(base), unpaid_days, Decimal::ZERO);

        let first = calculate_payroll(&input, &rates).unwrap();
        let second = calculate_payroll(&input, &rates).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_remaining_days_never_negative(
        entitlement in 0u32..30,
        day_counts in proptest::collection::vec(1u32..20, 0..8),
    ) {
        let requests: Vec<LeaveRequest> = day_counts
            .iter()
            .enumerate()
            .map(|(i, &day_count)| LeaveRequest {
                id: uuid::Uuid::new_v4(),
                employee_id: "emp_prop".to_string(),
                leave_type: "annual".to_string(),
                start_date: date("2024-02-01") + chrono::Duration::days(i as i64 * 30),
                end_date: date("2024-02-01") + chrono::Duration::days(i as i64 * 30 + day_count as i64 - 1),
                day_count,
                status: LeaveStatus::Approved,
            })
            .collect();

        let balance = leave_balance("annual", entitlement, 2024, &requests);
        prop_assert!(balance.remaining_days <= entitlement);
        let used: u32 = day_counts.iter().sum();
        prop_assert_eq!(balance.used_days, used);
    }
}
