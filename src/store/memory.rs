//! In-memory record store.
//!
//! Keeps the operational records the rule engine works over: employees,
//! leave requests, attendance, payroll results, candidates, announcements,
//! and user accounts. Maps are guarded per collection so unrelated
//! handlers never contend on one lock.
//!
//! Attendance is keyed by `(employee_id, date)` and payroll by
//! `(employee_id, period)`; writing to an existing key replaces the
//! record, which is what makes attendance entry and batch generation
//! idempotent.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Announcement, AttendanceRecord, Candidate, Employee, LeaveRequest, PayPeriod, PayrollBreakdown,
    PayrollRecord, UserAccount,
};

/// The in-memory store shared across request handlers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<HashMap<String, Employee>>,
    leave_requests: RwLock<HashMap<Uuid, LeaveRequest>>,
    attendance: RwLock<HashMap<(String, NaiveDate), AttendanceRecord>>,
    payroll: RwLock<HashMap<(String, PayPeriod), PayrollRecord>>,
    candidates: RwLock<HashMap<Uuid, Candidate>>,
    announcements: RwLock<HashMap<Uuid, Announcement>>,
    accounts: RwLock<HashMap<String, UserAccount>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Employees ---

    /// Inserts or replaces an employee record, keyed by employee id.
    pub async fn upsert_employee(&self, employee: Employee) {
        self.employees
            .write()
            .await
            .insert(employee.id.clone(), employee);
    }

    /// Fetches an employee by id.
    ///
    /// # Errors
    ///
    /// `EmployeeNotFound` if no employee exists with that id.
    pub async fn get_employee(&self, id: &str) -> EngineResult<Employee> {
        self.employees
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Returns all employees, ordered by id.
    pub async fn list_employees(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self.employees.read().await.values().cloned().collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        employees
    }

    /// Returns active employees, ordered by id. The payroll batch runs
    /// over this set.
    pub async fn list_active_employees(&self) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self
            .employees
            .read()
            .await
            .values()
            .filter(|e| e.active)
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.id.cmp(&b.id));
        employees
    }

    // --- Leave requests ---

    /// Stores a new leave request.
    pub async fn insert_leave_request(&self, request: LeaveRequest) {
        self.leave_requests
            .write()
            .await
            .insert(request.id, request);
    }

    /// Fetches a leave request by id.
    ///
    /// # Errors
    ///
    /// `LeaveRequestNotFound` if no request exists with that id.
    pub async fn get_leave_request(&self, id: Uuid) -> EngineResult<LeaveRequest> {
        self.leave_requests
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(EngineError::LeaveRequestNotFound { id })
    }

    /// Replaces a stored leave request after a status transition.
    ///
    /// # Errors
    ///
    /// `LeaveRequestNotFound` if the request was never stored.
    pub async fn update_leave_request(&self, request: LeaveRequest) -> EngineResult<()> {
        let mut requests = self.leave_requests.write().await;
        if !requests.contains_key(&request.id) {
            return Err(EngineError::LeaveRequestNotFound { id: request.id });
        }
        requests.insert(request.id, request);
        Ok(())
    }

    /// Returns all leave requests for one employee, ordered by start date.
    pub async fn list_leave_requests_for(&self, employee_id: &str) -> Vec<LeaveRequest> {
        let mut requests: Vec<LeaveRequest> = self
            .leave_requests
            .read()
            .await
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        requests.sort_by_key(|r| r.start_date);
        requests
    }

    /// Returns every leave request, ordered by start date.
    pub async fn list_leave_requests(&self) -> Vec<LeaveRequest> {
        let mut requests: Vec<LeaveRequest> =
            self.leave_requests.read().await.values().cloned().collect();
        requests.sort_by_key(|r| r.start_date);
        requests
    }

    // --- Attendance ---

    /// Inserts or replaces the attendance record for the record's
    /// `(employee, date)` pair. Returns `true` when a new record was
    /// created, `false` when an existing one was replaced.
    pub async fn upsert_attendance(&self, record: AttendanceRecord) -> bool {
        let key = (record.employee_id.clone(), record.date);
        self.attendance.write().await.insert(key, record).is_none()
    }

    /// Returns an employee's attendance records within a period, ordered
    /// by date.
    pub async fn list_attendance_for(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = self
            .attendance
            .read()
            .await
            .values()
            .filter(|r| r.employee_id == employee_id && period.contains(r.date))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        records
    }

    // --- Payroll ---

    /// Inserts or replaces the payroll record for the breakdown's
    /// `(employee, period)` pair. Regenerating a period overwrites the
    /// previous result and resets the paid flag.
    pub async fn upsert_payroll(&self, breakdown: PayrollBreakdown) -> PayrollRecord {
        let key = (breakdown.employee_id.clone(), breakdown.period);
        let record = PayrollRecord::from_breakdown(breakdown);
        self.payroll.write().await.insert(key, record.clone());
        record
    }

    /// Fetches the payroll record for one employee and period.
    ///
    /// # Errors
    ///
    /// `PayrollNotFound` if no record exists for that pair.
    pub async fn get_payroll(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<PayrollRecord> {
        self.payroll
            .read()
            .await
            .get(&(employee_id.to_string(), period))
            .cloned()
            .ok_or_else(|| EngineError::PayrollNotFound {
                employee_id: employee_id.to_string(),
                year: period.year,
                month: period.month,
            })
    }

    /// Returns all payroll records for a period, ordered by employee id.
    pub async fn list_payroll_for_period(&self, period: PayPeriod) -> Vec<PayrollRecord> {
        let mut records: Vec<PayrollRecord> = self
            .payroll
            .read()
            .await
            .values()
            .filter(|r| r.breakdown.period == period)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.breakdown.employee_id.cmp(&b.breakdown.employee_id));
        records
    }

    /// Returns every payroll record, ordered by employee id then period.
    pub async fn list_payroll(&self) -> Vec<PayrollRecord> {
        let mut records: Vec<PayrollRecord> = self.payroll.read().await.values().cloned().collect();
        records.sort_by(|a, b| {
            (&a.breakdown.employee_id, a.breakdown.period.year, a.breakdown.period.month).cmp(&(
                &b.breakdown.employee_id,
                b.breakdown.period.year,
                b.breakdown.period.month,
            ))
        });
        records
    }

    /// Returns all payroll records for one employee, newest period first.
    pub async fn list_payroll_for_employee(&self, employee_id: &str) -> Vec<PayrollRecord> {
        let mut records: Vec<PayrollRecord> = self
            .payroll
            .read()
            .await
            .values()
            .filter(|r| r.breakdown.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse((r.breakdown.period.year, r.breakdown.period.month)));
        records
    }

    /// Marks a payroll record as paid on the given date.
    ///
    /// # Errors
    ///
    /// `PayrollNotFound` if no record exists for that employee and period.
    pub async fn mark_payroll_paid(
        &self,
        employee_id: &str,
        period: PayPeriod,
        payment_date: NaiveDate,
    ) -> EngineResult<PayrollRecord> {
        let mut payroll = self.payroll.write().await;
        let record = payroll
            .get_mut(&(employee_id.to_string(), period))
            .ok_or_else(|| EngineError::PayrollNotFound {
                employee_id: employee_id.to_string(),
                year: period.year,
                month: period.month,
            })?;
        record.mark_paid(payment_date);
        Ok(record.clone())
    }

    // --- Candidates ---

    /// Stores a new candidate.
    pub async fn insert_candidate(&self, candidate: Candidate) {
        self.candidates
            .write()
            .await
            .insert(candidate.id, candidate);
    }

    /// Fetches a candidate by id, if stored.
    pub async fn get_candidate(&self, id: Uuid) -> Option<Candidate> {
        self.candidates.read().await.get(&id).cloned()
    }

    /// Replaces a stored candidate. Returns `false` if the candidate was
    /// never stored.
    pub async fn update_candidate(&self, candidate: Candidate) -> bool {
        let mut candidates = self.candidates.write().await;
        if !candidates.contains_key(&candidate.id) {
            return false;
        }
        candidates.insert(candidate.id, candidate);
        true
    }

    /// Returns all candidates, ordered by application date.
    pub async fn list_candidates(&self) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> =
            self.candidates.read().await.values().cloned().collect();
        candidates.sort_by_key(|c| c.application_date);
        candidates
    }

    // --- Announcements ---

    /// Stores a new announcement.
    pub async fn insert_announcement(&self, announcement: Announcement) {
        self.announcements
            .write()
            .await
            .insert(announcement.id, announcement);
    }

    /// Returns announcements that have not expired as of today, newest
    /// first.
    pub async fn list_active_announcements(&self) -> Vec<Announcement> {
        let today = Utc::now().date_naive();
        let mut announcements: Vec<Announcement> = self
            .announcements
            .read()
            .await
            .values()
            .filter(|a| !a.is_expired(today))
            .cloned()
            .collect();
        announcements.sort_by_key(|a| std::cmp::Reverse(a.published_at));
        announcements
    }

    // --- User accounts ---

    /// Inserts or replaces an account, keyed by username.
    pub async fn upsert_account(&self, account: UserAccount) {
        self.accounts
            .write()
            .await
            .insert(account.username.clone(), account);
    }

    /// Fetches an account by username, if stored.
    pub async fn get_account(&self, username: &str) -> Option<UserAccount> {
        self.accounts.read().await.get(username).cloned()
    }
}
