//! Monthly payroll batch generation.
//!
//! Runs the payroll calculation over every active employee for one
//! period, either as a dry run (`preview_period`) or persisting the
//! results (`generate_period`). One employee failing never aborts the
//! batch: the failure is recorded against that employee and the run
//! continues.

use serde::{Deserialize, Serialize};

use crate::calculation::{
    calculate_payroll, effective_base_salary, overtime_hourly_rate, resolve_period_attendance,
    unpaid_days_in_period, PayrollInput,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{Employee, PayPeriod, PayrollBreakdown, PayrollRecord};
use crate::store::MemoryStore;

/// A per-employee failure recorded during a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// The employee whose payroll could not be computed.
    pub employee_id: String,
    /// Why the computation failed.
    pub reason: String,
}

/// Result of a dry-run batch over one period. Nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewOutcome {
    /// The period the dry run covered.
    pub period: PayPeriod,
    /// Breakdowns for the employees that computed cleanly.
    pub items: Vec<PayrollBreakdown>,
    /// Employees whose payroll could not be computed.
    pub errors: Vec<BatchError>,
}

/// Result of a persisting batch over one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutcome {
    /// The period the batch covered.
    pub period: PayPeriod,
    /// Records written to the store, one per successful employee.
    pub records: Vec<PayrollRecord>,
    /// Employees whose payroll could not be computed.
    pub errors: Vec<BatchError>,
}

/// Assembles and runs the payroll calculation for one employee.
///
/// Pulls the employee's attendance and leave for the period from the
/// store, resolves the base salary, and feeds everything to the
/// calculator.
pub async fn compute_employee_payroll(
    employee: &Employee,
    period: PayPeriod,
    store: &MemoryStore,
    config: &ConfigLoader,
) -> EngineResult<PayrollBreakdown> {
    let base_salary = effective_base_salary(employee, config)?;

    let attendance_records = store.list_attendance_for(&employee.id, period).await;
    let attendance = resolve_period_attendance(&attendance_records, period);

    let leave_requests = store.list_leave_requests_for(&employee.id).await;
    let unpaid_days = unpaid_days_in_period(&leave_requests, config.config().leave_types(), period);

    let input = PayrollInput {
        employee_id: employee.id.clone(),
        period,
        base_salary,
        overtime_hours: attendance.overtime_hours,
        overtime_hourly_rate: overtime_hourly_rate(base_salary, config.rates()),
        unpaid_days,
        additions: vec![],
    };

    calculate_payroll(&input, config.rates())
}

/// Computes payroll for every active employee without persisting
/// anything.
pub async fn preview_period(
    store: &MemoryStore,
    config: &ConfigLoader,
    period: PayPeriod,
) -> PreviewOutcome {
    let mut items = Vec::new();
    let mut errors = Vec::new();

    for employee in store.list_active_employees().await {
        match compute_employee_payroll(&employee, period, store, config).await {
            Ok(breakdown) => items.push(breakdown),
            Err(err) => errors.push(BatchError {
                employee_id: employee.id.clone(),
                reason: err.to_string(),
            }),
        }
    }

    PreviewOutcome {
        period,
        items,
        errors,
    }
}

/// Computes and stores payroll for every active employee.
///
/// Results are upserted by `(employee, period)`, so re-running the same
/// period replaces the earlier records instead of duplicating them.
pub async fn generate_period(
    store: &MemoryStore,
    config: &ConfigLoader,
    period: PayPeriod,
) -> GenerateOutcome {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for employee in store.list_active_employees().await {
        match compute_employee_payroll(&employee, period, store, config).await {
            Ok(breakdown) => {
                records.push(store.upsert_payroll(breakdown).await);
            }
            Err(err) => errors.push(BatchError {
                employee_id: employee.id.clone(),
                reason: err.to_string(),
            }),
        }
    }

    GenerateOutcome {
        period,
        records,
        errors,
    }
}
