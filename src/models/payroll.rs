//! Payroll result models.
//!
//! This module contains the itemized [`PayrollBreakdown`] produced by the
//! payroll calculator and the persisted [`PayrollRecord`] keyed uniquely
//! by (employee, period).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// A named addition on top of gross salary (overtime pay, bonus, meal
/// allowance, manually entered amounts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addition {
    /// Label for the addition (e.g., "bonus", "meal_allowance").
    pub name: String,
    /// Non-negative amount.
    pub amount: Decimal,
}

/// The itemized result of one employee's payroll computation for a period.
///
/// The invariant `net = gross + total_additions - total_deductions` holds
/// exactly for every breakdown the calculator produces.
///
/// # Example
///
/// ```
/// use bordro_engine::models::{PayrollBreakdown, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let breakdown = PayrollBreakdown {
///     employee_id: "emp_001".to_string(),
///     period: PayPeriod::new(2024, 6).unwrap(),
///     gross: Decimal::new(30000, 0),
///     overtime_hours: Decimal::ZERO,
///     overtime_pay: Decimal::ZERO,
///     additions: vec![],
///     total_additions: Decimal::ZERO,
///     unpaid_days: 0,
///     unpaid_deduction: Decimal::ZERO,
///     sgk_employee: Decimal::new(4200, 0),
///     income_tax: Decimal::new(4410, 0),
///     stamp_duty: Decimal::ZERO,
///     total_deductions: Decimal::new(8610, 0),
///     net: Decimal::new(21390, 0),
/// };
/// assert_eq!(
///     breakdown.net,
///     breakdown.gross + breakdown.total_additions - breakdown.total_deductions
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// The employee this breakdown belongs to.
    pub employee_id: String,
    /// The payroll period.
    pub period: PayPeriod,
    /// Effective base salary for the period. Additions are tracked
    /// separately and never folded into gross.
    pub gross: Decimal,
    /// Overtime hours summed across in-period attendance records.
    pub overtime_hours: Decimal,
    /// Overtime pay (hours x derived hourly rate).
    pub overtime_pay: Decimal,
    /// Named additions other than overtime pay.
    pub additions: Vec<Addition>,
    /// Overtime pay plus all named additions.
    pub total_additions: Decimal,
    /// Approved unpaid-leave days falling within the period.
    pub unpaid_days: u32,
    /// Deduction for unpaid-leave days (days x daily rate).
    pub unpaid_deduction: Decimal,
    /// Employee-side social security withholding.
    pub sgk_employee: Decimal,
    /// Income tax on the taxable base (gross minus SGK employee share).
    pub income_tax: Decimal,
    /// Stamp-duty withholding.
    pub stamp_duty: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Net pay: gross + total additions - total deductions.
    pub net: Decimal,
}

/// A persisted payroll record for one employee and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The itemized breakdown this record was generated from.
    pub breakdown: PayrollBreakdown,
    /// Whether the salary has been paid out.
    pub paid: bool,
    /// Date of payment, set when marked paid.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// When this record was generated (regeneration refreshes it).
    pub generated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Creates an unpaid record from a computed breakdown.
    pub fn from_breakdown(breakdown: PayrollBreakdown) -> Self {
        Self {
            id: Uuid::new_v4(),
            breakdown,
            paid: false,
            payment_date: None,
            generated_at: Utc::now(),
        }
    }

    /// Marks the record as paid on the given date.
    pub fn mark_paid(&mut self, date: NaiveDate) {
        self.paid = true;
        self.payment_date = Some(date);
    }
}
