//! Request types for the payroll API.
//!
//! This module defines the JSON request bodies for the `/payroll/preview`
//! and `/payroll/process` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayrollInput, SalaryInput};

/// Request body for the `/payroll/preview` endpoint.
///
/// Monetary amounts may be sent as JSON strings or numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// The full-period basic salary.
    pub basic_salary: Decimal,
    /// Working days in the period.
    pub working_days: i32,
    /// Days actually worked.
    pub days_worked: i32,
    /// Allowances added to gross pay.
    #[serde(default)]
    pub allowances: Decimal,
    /// Non-statutory deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
}

/// Request body for the `/payroll/process` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// The employee whose stored salary is used.
    pub employee_id: String,
    /// The payroll period being processed.
    pub period_id: String,
    /// Working days in the period.
    pub working_days: i32,
    /// Days actually worked.
    pub days_worked: i32,
}

impl From<PreviewRequest> for PayrollInput {
    fn from(req: PreviewRequest) -> Self {
        PayrollInput::new(SalaryInput::new(
            req.basic_salary,
            req.working_days,
            req.days_worked,
        ))
        .with_allowances(req.allowances)
        .with_other_deductions(req.other_deductions)
    }
}
