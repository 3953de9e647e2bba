//! Salary and attendance inputs.
//!
//! This module defines the inputs a payroll calculation starts from: the
//! [`SalaryInput`] describing pay and attendance, the [`PayrollInput`] that
//! adds externally computed allowances and deductions, and the
//! [`SalaryRecord`] rows served by a salary repository.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Basic salary and attendance for one pay period.
///
/// Day counts are signed so that out-of-range values coming from callers
/// surface as `InvalidInput` errors rather than deserialization failures.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::from(50_000), 22, 20);
/// assert!(input.is_partial_period());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// The full-period basic salary.
    pub basic_salary: Decimal,
    /// Working days in the period.
    pub working_days: i32,
    /// Days actually worked in the period.
    pub days_worked: i32,
}

impl SalaryInput {
    /// Creates a new salary input.
    pub fn new(basic_salary: Decimal, working_days: i32, days_worked: i32) -> Self {
        Self {
            basic_salary,
            working_days,
            days_worked,
        }
    }

    /// Returns true if fewer days were worked than the period has.
    pub fn is_partial_period(&self) -> bool {
        self.days_worked < self.working_days
    }
}

/// Everything the engine needs to compute one payroll result.
///
/// Allowances and other deductions are computed outside the engine and
/// default to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Basic salary and attendance.
    pub salary: SalaryInput,
    /// Allowances added to the prorated basic salary.
    #[serde(default)]
    pub allowances: Decimal,
    /// Non-statutory deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
}

impl PayrollInput {
    /// Creates an input with no allowances and no other deductions.
    pub fn new(salary: SalaryInput) -> Self {
        Self {
            salary,
            allowances: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
        }
    }

    /// Sets the allowances.
    pub fn with_allowances(mut self, allowances: Decimal) -> Self {
        self.allowances = allowances;
        self
    }

    /// Sets the other deductions.
    pub fn with_other_deductions(mut self, other_deductions: Decimal) -> Self {
        self.other_deductions = other_deductions;
        self
    }
}

/// A salary row as stored by the surrounding HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The employee this salary belongs to.
    pub employee_id: String,
    /// The monthly basic salary.
    pub basic_salary: Decimal,
    /// The date the salary takes effect.
    pub effective_date: NaiveDate,
    /// Whether the row is active.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Picks the active salary for an employee from a set of rows.
///
/// The active salary is the active row with the latest effective date.
pub fn select_active_salary<'a, I>(records: I, employee_id: &str) -> Option<&'a SalaryRecord>
where
    I: IntoIterator<Item = &'a SalaryRecord>,
{
    records
        .into_iter()
        .filter(|r| r.active && r.employee_id == employee_id)
        .max_by_key(|r| r.effective_date)
}
