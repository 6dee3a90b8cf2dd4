//! The payroll calculator.
//!
//! This module implements the central payroll rule: given an effective
//! base salary, overtime, unpaid-leave days, and named additions, it
//! produces the itemized gross / additions / deductions / net breakdown.
//! The calculation is a pure function of its inputs — identical inputs
//! always produce an identical breakdown.

use rust_decimal::Decimal;

use crate::config::{PayrollRates, TaxBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::{Addition, PayPeriod, PayrollBreakdown};

/// Inputs for one employee's payroll computation for one period.
///
/// The batch generator assembles these from the employee, attendance, and
/// leave stores; the stateless preview endpoint accepts them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollInput {
    /// The employee being paid.
    pub employee_id: String,
    /// The payroll period.
    pub period: PayPeriod,
    /// Effective monthly base salary (already resolved: override or
    /// position-and-tier).
    pub base_salary: Decimal,
    /// Overtime hours recorded in the period.
    pub overtime_hours: Decimal,
    /// Hourly rate applied to the overtime hours.
    pub overtime_hourly_rate: Decimal,
    /// Approved unpaid-leave days falling within the period.
    pub unpaid_days: u32,
    /// Named additions other than overtime pay, each non-negative.
    pub additions: Vec<Addition>,
}

/// Computes income tax on a taxable base using the marginal bracket
/// schedule from configuration.
///
/// Each bracket taxes the slice of the base between the previous bound
/// and its own `up_to`; the open-ended final bracket covers the rest.
/// A non-positive base yields zero tax.
pub fn income_tax(taxable_base: Decimal, brackets: &[TaxBracket]) -> Decimal {
    if taxable_base <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;

    for bracket in brackets {
        let upper = bracket.up_to.unwrap_or(taxable_base);
        let slice = taxable_base.min(upper) - lower;
        if slice <= Decimal::ZERO {
            break;
        }
        tax += slice * bracket.rate;
        lower = upper;
    }

    tax.round_dp(2)
}

/// Runs the payroll computation for one employee and period.
///
/// The steps, in order:
/// 1. `gross` = effective base salary. Additions are tracked separately
///    and never folded into gross.
/// 2. Overtime pay = overtime hours x hourly rate, included in total
///    additions alongside the named additions.
/// 3. Unpaid-leave deduction = unpaid days x daily rate, where the daily
///    rate is `gross / days_in_month`.
/// 4. SGK employee share = gross x SGK rate.
/// 5. Income tax on `gross - sgk_employee` via the bracket schedule.
/// 6. Stamp duty = gross x stamp rate.
/// 7. `net = gross + total_additions - total_deductions`, exactly.
///
/// # Errors
///
/// `Validation` if the base salary, overtime hours, hourly rate, or any
/// addition amount is negative. Rate constants are validated at
/// configuration load, not here.
pub fn calculate_payroll(
    input: &PayrollInput,
    rates: &PayrollRates,
) -> EngineResult<PayrollBreakdown> {
    if input.base_salary < Decimal::ZERO {
        return Err(EngineError::Validation {
            field: "base_salary".to_string(),
            message: format!("must not be negative, got {}", input.base_salary),
        });
    }
    if input.overtime_hours < Decimal::ZERO {
        return Err(EngineError::Validation {
            field: "overtime_hours".to_string(),
            message: format!("must not be negative, got {}", input.overtime_hours),
        });
    }
    if input.overtime_hourly_rate < Decimal::ZERO {
        return Err(EngineError::Validation {
            field: "overtime_hourly_rate".to_string(),
            message: format!("must not be negative, got {}", input.overtime_hourly_rate),
        });
    }
    for addition in &input.additions {
        if addition.amount < Decimal::ZERO {
            return Err(EngineError::Validation {
                field: format!("additions.{}", addition.name),
                message: format!("must not be negative, got {}", addition.amount),
            });
        }
    }

    let gross = input.base_salary.round_dp(2);

    let overtime_pay = (input.overtime_hours * input.overtime_hourly_rate).round_dp(2);
    let named_additions: Decimal = input.additions.iter().map(|a| a.amount).sum();
    let total_additions = overtime_pay + named_additions.round_dp(2);

    let daily_rate = gross / rates.days_in_month;
    let unpaid_deduction = (Decimal::from(input.unpaid_days) * daily_rate).round_dp(2);

    let sgk_employee = (gross * rates.sgk_employee_rate).round_dp(2);
    let tax = income_tax(gross - sgk_employee, &rates.tax_brackets);
    let stamp_duty = (gross * rates.stamp_duty_rate).round_dp(2);

    let total_deductions = unpaid_deduction + sgk_employee + tax + stamp_duty;
    let net = gross + total_additions - total_deductions;

    Ok(PayrollBreakdown {
        employee_id: input.employee_id.clone(),
        period: input.period,
        gross,
        overtime_hours: input.overtime_hours,
        overtime_pay,
        additions: input.additions.clone(),
        total_additions,
        unpaid_days: input.unpaid_days,
        unpaid_deduction,
        sgk_employee,
        income_tax: tax,
        stamp_duty,
        total_deductions,
        net,
    })
}
