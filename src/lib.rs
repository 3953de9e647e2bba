//! Payroll engine for Kenyan statutory deductions
//!
//! This crate computes gross pay, PAYE income tax, NSSF, NHIF and Housing
//! Levy deductions, and net pay for a salaried employee and pay period. It
//! pro-rates salary for partial attendance, reads tax brackets and salaries
//! through repository traits, and exposes the calculation over an HTTP API.

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod settings;
