//! Input validation and salary pro-ration.
//!
//! When an employee works fewer days than the period has, the basic salary is
//! scaled by the fraction of days worked.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayrollInput, SalaryInput};

use super::round_money;

/// The result of pro-rating a basic salary, including the audit step.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// The basic salary after pro-ration, rounded to two decimal places.
    pub prorated_salary: Decimal,
    /// Whether a partial period was applied.
    pub prorated: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Largest amount accepted for any monetary input (one trillion).
///
/// Annualising and taxing an amount below this ceiling stays well inside
/// `Decimal`'s range, so the calculators never overflow.
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn check_money_range(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", amount),
        ));
    }
    if amount > MAX_MONEY_AMOUNT {
        return Err(EngineError::invalid_input(
            field,
            format!("must not exceed {}, got {}", MAX_MONEY_AMOUNT, amount),
        ));
    }
    Ok(())
}

/// Validates salary and attendance values.
///
/// Fails with `InvalidInput` when `working_days <= 0`, `days_worked < 0`,
/// `days_worked > working_days`, or the basic salary is negative or above
/// [`MAX_MONEY_AMOUNT`].
pub fn validate_salary_input(input: &SalaryInput) -> EngineResult<()> {
    if input.working_days <= 0 {
        return Err(EngineError::invalid_input(
            "working_days",
            format!("must be greater than zero, got {}", input.working_days),
        ));
    }
    if input.days_worked < 0 {
        return Err(EngineError::invalid_input(
            "days_worked",
            format!("must not be negative, got {}", input.days_worked),
        ));
    }
    if input.days_worked > input.working_days {
        return Err(EngineError::invalid_input(
            "days_worked",
            format!(
                "{} exceeds working_days {}",
                input.days_worked, input.working_days
            ),
        ));
    }
    check_money_range("basic_salary", input.basic_salary)
}

/// Validates a full payroll input, including externally supplied amounts.
pub fn validate_payroll_input(input: &PayrollInput) -> EngineResult<()> {
    validate_salary_input(&input.salary)?;
    check_money_range("allowances", input.allowances)?;
    check_money_range("other_deductions", input.other_deductions)
}

/// Pro-rates the basic salary by days worked.
///
/// If `days_worked < working_days` the result is
/// `basic_salary * days_worked / working_days`; otherwise the basic salary
/// is returned unchanged.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::prorate_salary;
/// use payroll_engine::models::SalaryInput;
/// use rust_decimal::Decimal;
///
/// let input = SalaryInput::new(Decimal::from(44_000), 22, 11);
/// let result = prorate_salary(&input, 1).unwrap();
/// assert_eq!(result.prorated_salary, Decimal::from(22_000));
/// ```
pub fn prorate_salary(input: &SalaryInput, step_number: u32) -> EngineResult<ProrationResult> {
    validate_salary_input(input)?;

    let prorated = input.is_partial_period();
    let prorated_salary = if prorated {
        round_money(
            input.basic_salary * Decimal::from(input.days_worked)
                / Decimal::from(input.working_days),
        )
    } else {
        round_money(input.basic_salary)
    };

    let reasoning = if prorated {
        format!(
            "{} x {}/{} days = {}",
            input.basic_salary.normalize(),
            input.days_worked,
            input.working_days,
            prorated_salary
        )
    } else {
        format!(
            "Full period worked ({} of {} days), no pro-ration",
            input.days_worked, input.working_days
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "proration".to_string(),
        rule_name: "Salary Pro-ration".to_string(),
        input: serde_json::json!({
            "basic_salary": input.basic_salary.to_string(),
            "working_days": input.working_days,
            "days_worked": input.days_worked
        }),
        output: serde_json::json!({
            "prorated_salary": prorated_salary.to_string(),
            "prorated": prorated
        }),
        reasoning,
    };

    Ok(ProrationResult {
        prorated_salary,
        prorated,
        audit_step,
    })
}
