//! Calculation result models for the payroll engine.
//!
//! This module contains the [`PayrollResult`] figures and the
//! [`PayrollCalculation`] envelope that wraps them with identifiers and an
//! audit trace of every rule the engine applied.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The figures produced for one employee and pay period.
///
/// `basic_salary` is the prorated basic salary. Every monetary field is
/// rounded to two decimal places.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollResult;
/// use rust_decimal::Decimal;
///
/// let result = PayrollResult {
///     basic_salary: Decimal::from(10_000),
///     gross_salary: Decimal::from(10_000),
///     allowances: Decimal::ZERO,
///     paye_tax: Decimal::ZERO,
///     nssf: Decimal::from(600),
///     nhif: Decimal::from(400),
///     housing_levy: Decimal::from(150),
///     other_deductions: Decimal::ZERO,
///     total_deductions: Decimal::from(1_150),
///     net_salary: Decimal::from(8_850),
///     working_days: 22,
///     days_worked: 22,
/// };
/// assert_eq!(result.gross_salary - result.total_deductions, result.net_salary);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Basic salary after pro-ration.
    pub basic_salary: Decimal,
    /// Prorated basic salary plus allowances.
    pub gross_salary: Decimal,
    /// Allowances included in the gross salary.
    pub allowances: Decimal,
    /// Monthly PAYE income tax.
    pub paye_tax: Decimal,
    /// NSSF contribution.
    pub nssf: Decimal,
    /// NHIF contribution.
    pub nhif: Decimal,
    /// Housing Levy.
    pub housing_levy: Decimal,
    /// Non-statutory deductions.
    pub other_deductions: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross salary less total deductions.
    pub net_salary: Decimal,
    /// Working days in the period.
    pub working_days: i32,
    /// Days actually worked.
    pub days_worked: i32,
}

/// Which call site produced a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Figures computed from a caller-supplied salary for display only.
    Preview,
    /// Figures computed from the employee's stored salary for a payroll run.
    Processing,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The envelope returned for every engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Preview or processing.
    pub mode: CalculationMode,
    /// The employee, for processing calculations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// The payroll period, for processing calculations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_id: Option<String>,
    /// The date statutory configuration was resolved for.
    pub as_of: NaiveDate,
    /// The computed figures.
    pub result: PayrollResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
