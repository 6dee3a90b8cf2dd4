//! Payroll batch runs.

pub mod generator;

pub use generator::{
    compute_employee_payroll, generate_period, preview_period, BatchError, GenerateOutcome,
    PreviewOutcome,
};
