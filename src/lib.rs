//! Payroll engine for Spanish employment contracts
//!
//! This crate resolves the monthly salary of an employee, derives the Social
//! Security contribution bases, computes worker and employer contributions,
//! estimates the annual IRPF withholding and produces the net salary, with an
//! audit trace of every step.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
