//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod salary;
mod tax_bracket;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationMode, PayrollCalculation, PayrollResult,
};
pub use salary::{PayrollInput, SalaryInput, SalaryRecord, select_active_salary};
pub use tax_bracket::{TaxBracket, effective_bracket_set, validate_bracket_set};
