//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    HrConfig, LeaveTypeConfig, LeaveTypesConfig, PayrollRates, PositionConfig, PositionsConfig,
};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides lookup methods for statutory rates, leave types, and positions.
///
/// # Directory Structure
///
/// ```text
/// config/bordro/
/// ├── rates.yaml        # Statutory rates and payroll conventions
/// ├── leave_types.yaml  # Leave type reference data
/// └── positions.yaml    # Position reference data
/// ```
///
/// # Example
///
/// ```no_run
/// use bordro_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/bordro").unwrap();
/// let leave_type = loader.get_leave_type("annual").unwrap();
/// println!("Entitlement: {} days", leave_type.annual_entitlement_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/bordro")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any statutory rate fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates_path = path.join("rates.yaml");
        let rates = Self::load_yaml::<PayrollRates>(&rates_path)?;

        let leave_types_path = path.join("leave_types.yaml");
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&leave_types_path)?;

        let positions_path = path.join("positions.yaml");
        let positions = Self::load_yaml::<PositionsConfig>(&positions_path)?;

        let config = HrConfig::new(rates, leave_types.leave_types, positions.positions)?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Returns the statutory payroll rates.
    pub fn rates(&self) -> &PayrollRates {
        self.config.rates()
    }

    /// Gets a leave type by its code.
    ///
    /// Returns `LeaveTypeNotFound` if the code is unknown.
    pub fn get_leave_type(&self, code: &str) -> EngineResult<&LeaveTypeConfig> {
        self.config
            .leave_types()
            .get(code)
            .ok_or_else(|| EngineError::LeaveTypeNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a position by its code.
    ///
    /// Returns `PositionNotFound` if the code is unknown.
    pub fn get_position(&self, code: &str) -> EngineResult<&PositionConfig> {
        self.config
            .positions()
            .get(code)
            .ok_or_else(|| EngineError::PositionNotFound {
                code: code.to_string(),
            })
    }

    /// Gets the monthly base salary for a position code.
    pub fn get_position_base(&self, code: &str) -> EngineResult<Decimal> {
        self.get_position(code).map(|p| p.base_salary)
    }
}
