//! Effective base salary resolution.
//!
//! This module determines an employee's monthly base salary, either from
//! their manual override or from the position base plus seniority tier.

use rust_decimal::Decimal;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Determines an employee's effective monthly base salary.
///
/// The salary is resolved with the following priority:
/// 1. If `employee.override_salary` is `Some`, that value is used as-is —
///    the override always wins, regardless of tier or position base.
/// 2. Otherwise, `position_base + (tier - 1) x tier_increment`, where the
///    position base comes from the reference data and the increment from
///    the statutory rates configuration.
///
/// # Errors
///
/// - `Validation` if the override salary is negative or the tier is 0
/// - `PositionNotFound` if no override is set and the position code is
///   unknown
///
/// # Examples
///
/// Position base 20,000 at tier 2 resolves to 35,000 with the default
/// 15,000 increment; an override of 45,000 wins over any computed value.
pub fn effective_base_salary(employee: &Employee, config: &ConfigLoader) -> EngineResult<Decimal> {
    if let Some(override_salary) = employee.override_salary {
        if override_salary < Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "override_salary".to_string(),
                message: format!("must not be negative, got {}", override_salary),
            });
        }
        return Ok(override_salary);
    }

    if employee.tier == 0 {
        return Err(EngineError::Validation {
            field: "tier".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    let position_base = config.get_position_base(&employee.position_code)?;
    let steps = Decimal::from(employee.tier - 1);

    Ok(position_base + steps * config.rates().tier_increment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::load("./config/bordro").unwrap()
    }

    fn create_test_employee(
        position: &str,
        tier: u32,
        override_salary: Option<Decimal>,
    ) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            national_id: "12345678901".to_string(),
            first_name: "Ayşe".to_string(),
            last_name: "Yılmaz".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            department: None,
            position_code: position.to_string(),
            tier,
            override_salary,
            phone: None,
            email: None,
            address: None,
            active: true,
        }
    }

    #[test]
    fn test_tier_1_earns_position_base() {
        let employee = create_test_employee("software_engineer", 1, None);
        let salary = effective_base_salary(&employee, &loader()).unwrap();
        assert_eq!(salary, dec("30000"));
    }

    #[test]
    fn test_tier_2_adds_one_increment() {
        let employee = create_test_employee("hr_specialist", 2, None);
        let salary = effective_base_salary(&employee, &loader()).unwrap();
        // 20,000 + 15,000
        assert_eq!(salary, dec("35000"));
    }

    #[test]
    fn test_tier_3_adds_two_increments() {
        let employee = create_test_employee("software_engineer", 3, None);
        let salary = effective_base_salary(&employee, &loader()).unwrap();
        // 30,000 + 2 x 15,000
        assert_eq!(salary, dec("60000"));
    }

    #[test]
    fn test_override_wins_over_tier_arithmetic() {
        // Tier 3 would compute 60,000; the override still wins.
        let employee = create_test_employee("software_engineer", 3, Some(dec("45000")));
        let salary = effective_base_salary(&employee, &loader()).unwrap();
        assert_eq!(salary, dec("45000"));
    }

    #[test]
    fn test_override_wins_even_for_unknown_position() {
        let employee = create_test_employee("no_such_position", 1, Some(dec("25000")));
        let salary = effective_base_salary(&employee, &loader()).unwrap();
        assert_eq!(salary, dec("25000"));
    }

    #[test]
    fn test_negative_override_rejected() {
        let employee = create_test_employee("software_engineer", 1, Some(dec("-1")));

        match effective_base_salary(&employee, &loader()) {
            Err(EngineError::Validation { field, .. }) => {
                assert_eq!(field, "override_salary");
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_tier_zero_rejected() {
        let employee = create_test_employee("software_engineer", 0, None);
        assert!(effective_base_salary(&employee, &loader()).is_err());
    }

    #[test]
    fn test_unknown_position_without_override_fails() {
        let employee = create_test_employee("astronaut", 1, None);

        match effective_base_salary(&employee, &loader()) {
            Err(EngineError::PositionNotFound { code }) => {
                assert_eq!(code, "astronaut");
            }
            other => panic!("Expected PositionNotFound, got {:?}", other),
        }
    }
}
