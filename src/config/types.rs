//! Configuration types for the payroll rule engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: statutory payroll rates
//! and the leave-type and position reference data.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// A single bracket in the progressive income-tax schedule.
///
/// Brackets are applied marginally in ascending order of `up_to`; the final
/// bracket leaves `up_to` unset and covers everything above the previous
/// threshold. The shipped schedule carries placeholder rates only — the real
/// statutory schedule is deployment configuration, never inferred.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the bracket (cumulative taxable amount). `None` for
    /// the open-ended top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate applied within this bracket.
    pub rate: Decimal,
}

/// Statutory rates and payroll conventions from `rates.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollRates {
    /// Employee-side social security (SGK) withholding rate.
    pub sgk_employee_rate: Decimal,
    /// Stamp-duty withholding rate applied to gross.
    pub stamp_duty_rate: Decimal,
    /// Progressive income-tax brackets applied to `gross - sgk_employee`.
    pub tax_brackets: Vec<TaxBracket>,
    /// Salary increment per seniority tier step above tier 1.
    pub tier_increment: Decimal,
    /// Conventional days in a month used for daily-rate derivation.
    pub days_in_month: Decimal,
    /// Standard working hours per day, used to derive the hourly rate.
    pub daily_hours: Decimal,
    /// Multiplier applied to the base hourly rate for overtime pay.
    pub overtime_multiplier: Decimal,
}

impl PayrollRates {
    /// Validates that every rate constant is positive and the bracket
    /// schedule is well-formed (ascending thresholds, open-ended top).
    pub fn validate(&self) -> EngineResult<()> {
        let positives = [
            ("sgk_employee_rate", self.sgk_employee_rate),
            ("stamp_duty_rate", self.stamp_duty_rate),
            ("tier_increment", self.tier_increment),
            ("days_in_month", self.days_in_month),
            ("daily_hours", self.daily_hours),
            ("overtime_multiplier", self.overtime_multiplier),
        ];
        for (name, value) in positives {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidRate {
                    name: name.to_string(),
                    message: format!("must be positive, got {}", value),
                });
            }
        }

        if self.tax_brackets.is_empty() {
            return Err(EngineError::InvalidRate {
                name: "tax_brackets".to_string(),
                message: "at least one bracket is required".to_string(),
            });
        }
        let mut previous: Option<Decimal> = None;
        for (i, bracket) in self.tax_brackets.iter().enumerate() {
            if bracket.rate <= Decimal::ZERO {
                return Err(EngineError::InvalidRate {
                    name: format!("tax_brackets[{}].rate", i),
                    message: format!("must be positive, got {}", bracket.rate),
                });
            }
            match (bracket.up_to, previous) {
                (Some(up_to), Some(prev)) if up_to <= prev => {
                    return Err(EngineError::InvalidRate {
                        name: format!("tax_brackets[{}].up_to", i),
                        message: format!("{} does not increase on previous bound {}", up_to, prev),
                    });
                }
                (None, _) if i != self.tax_brackets.len() - 1 => {
                    return Err(EngineError::InvalidRate {
                        name: format!("tax_brackets[{}].up_to", i),
                        message: "only the final bracket may be open-ended".to_string(),
                    });
                }
                _ => {}
            }
            previous = bracket.up_to;
        }
        if self.tax_brackets.last().is_some_and(|b| b.up_to.is_some()) {
            return Err(EngineError::InvalidRate {
                name: "tax_brackets".to_string(),
                message: "the final bracket must be open-ended".to_string(),
            });
        }
        Ok(())
    }
}

/// A leave type from `leave_types.yaml`.
///
/// Reference data edited only via admin settings; immutable at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypeConfig {
    /// The human-readable name of the leave type.
    pub name: String,
    /// Annual entitlement in days.
    pub annual_entitlement_days: u32,
    /// Whether days of this leave type are paid.
    pub paid: bool,
    /// Optional cap on days per single request.
    #[serde(default)]
    pub max_days: Option<u32>,
}

/// Leave types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// Map of leave type code to leave type details.
    pub leave_types: HashMap<String, LeaveTypeConfig>,
}

/// A position from `positions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionConfig {
    /// The human-readable name of the position.
    pub name: String,
    /// Monthly base salary for tier 1 of this position.
    pub base_salary: Decimal,
    /// Optional department this position belongs to.
    #[serde(default)]
    pub department: Option<String>,
}

/// Positions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionsConfig {
    /// Map of position code to position details.
    pub positions: HashMap<String, PositionConfig>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct HrConfig {
    /// Statutory payroll rates.
    rates: PayrollRates,
    /// Leave types keyed by code.
    leave_types: HashMap<String, LeaveTypeConfig>,
    /// Positions keyed by code.
    positions: HashMap<String, PositionConfig>,
}

impl HrConfig {
    /// Creates a new HrConfig from its component parts, validating the
    /// statutory rates.
    pub fn new(
        rates: PayrollRates,
        leave_types: HashMap<String, LeaveTypeConfig>,
        positions: HashMap<String, PositionConfig>,
    ) -> EngineResult<Self> {
        rates.validate()?;
        for (code, position) in &positions {
            if position.base_salary < Decimal::ZERO {
                return Err(EngineError::InvalidRate {
                    name: format!("positions.{}.base_salary", code),
                    message: format!("must not be negative, got {}", position.base_salary),
                });
            }
        }
        Ok(Self {
            rates,
            leave_types,
            positions,
        })
    }

    /// Returns the statutory payroll rates.
    pub fn rates(&self) -> &PayrollRates {
        &self.rates
    }

    /// Returns all leave types.
    pub fn leave_types(&self) -> &HashMap<String, LeaveTypeConfig> {
        &self.leave_types
    }

    /// Returns all positions.
    pub fn positions(&self) -> &HashMap<String, PositionConfig> {
        &self.positions
    }
}
