//! Employee model.
//!
//! This module defines the Employee struct representing a person on the
//! payroll, including the fields the salary rules read: position code,
//! seniority tier, and the optional manual override salary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee subject to payroll and leave rules.
///
/// The effective base salary is the manual `override_salary` when set,
/// otherwise it is derived from the position's base salary and the
/// seniority `tier` (see [`crate::calculation::effective_base_salary`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// National identity number.
    pub national_id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Date employment started.
    pub hire_date: NaiveDate,
    /// Optional department code.
    #[serde(default)]
    pub department: Option<String>,
    /// Position code resolved against the position reference data.
    pub position_code: String,
    /// Seniority tier, 1-based. Tier 1 earns the position base salary.
    pub tier: u32,
    /// Manual monthly salary override. Always wins over the computed
    /// position-and-tier salary when set.
    #[serde(default)]
    pub override_salary: Option<Decimal>,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional e-mail address.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Whether the employee is active (false = archived).
    pub active: bool,
}

impl Employee {
    /// Returns the employee's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if a manual salary override is set.
    pub fn has_override(&self) -> bool {
        self.override_salary.is_some()
    }
}
