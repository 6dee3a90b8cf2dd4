//! Configuration loading and management for the payroll rule engine.
//!
//! This module provides functionality to load the engine configuration from
//! YAML files: statutory rates (SGK, income tax brackets, stamp duty) and
//! the leave-type and position reference data.
//!
//! # Example
//!
//! ```no_run
//! use bordro_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/bordro").unwrap();
//! println!("SGK rate: {}", config.rates().sgk_employee_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    HrConfig, LeaveTypeConfig, LeaveTypesConfig, PayrollRates, PositionConfig, PositionsConfig,
    TaxBracket,
};
