//! Payroll and leave rule engine for an HR management system.
//!
//! This crate implements the business-rule core behind an HR application:
//! payroll computation (gross pay, additions, statutory deductions, net),
//! payroll batch generation per period, leave-balance accounting, and
//! attendance adjustment, together with the reference data and role policy
//! that surround them.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
