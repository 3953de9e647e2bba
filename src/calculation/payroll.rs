//! Payroll aggregation.
//!
//! Runs every statutory calculator in order and combines their figures into
//! a [`PayrollResult`]. This is the single computation path shared by the
//! preview and processing call sites.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{NhifSchedule, StatutoryConfig};
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, PayrollInput, PayrollResult, TaxBracket};

use super::{
    calculate_housing_levy, calculate_nhif, calculate_nssf, calculate_paye, prorate_salary,
    round_money, validate_payroll_input,
};

/// The figures and the audit trail of one payroll computation.
#[derive(Debug, Clone)]
pub struct PayrollComputation {
    /// The computed figures.
    pub result: PayrollResult,
    /// One audit step per rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

/// Computes gross pay, statutory deductions and net pay.
///
/// PAYE, NSSF and Housing Levy use the prorated basic salary; NHIF uses the
/// gross salary. Every monetary figure is rounded as it is produced.
///
/// # Arguments
///
/// * `input` - Salary, attendance and externally supplied amounts
/// * `as_of` - The date the configuration was resolved for
/// * `brackets` - The PAYE bracket set in effect on `as_of`
/// * `statutory` - Relief, NSSF and Housing Levy parameters
/// * `nhif_schedule` - The NHIF schedule in effect on `as_of`
pub fn compute_payroll(
    input: &PayrollInput,
    as_of: NaiveDate,
    brackets: &[TaxBracket],
    statutory: &StatutoryConfig,
    nhif_schedule: &NhifSchedule,
) -> EngineResult<PayrollComputation> {
    validate_payroll_input(input)?;

    let mut audit_steps = Vec::with_capacity(6);
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let proration = prorate_salary(&input.salary, step_number)?;
    let basic_salary = proration.prorated_salary;
    audit_steps.push(proration.audit_step);
    step_number += 1;

    let allowances = round_money(input.allowances);
    let gross_salary = round_money(basic_salary + allowances);

    let paye = calculate_paye(basic_salary, brackets, &statutory.paye, as_of, step_number)?;
    audit_steps.push(paye.audit_step);
    step_number += 1;

    let nssf = calculate_nssf(basic_salary, &statutory.nssf, step_number);
    audit_steps.push(nssf.audit_step);
    step_number += 1;

    let nhif = calculate_nhif(gross_salary, nhif_schedule, step_number);
    audit_steps.push(nhif.audit_step);
    warnings.extend(nhif.warning);
    step_number += 1;

    let housing_levy = calculate_housing_levy(basic_salary, &statutory.housing_levy, step_number);
    audit_steps.push(housing_levy.audit_step);
    step_number += 1;

    let other_deductions = round_money(input.other_deductions);
    let total_deductions = round_money(
        paye.monthly_tax + nssf.contribution + nhif.contribution + housing_levy.levy
            + other_deductions,
    );
    let net_salary = round_money(gross_salary - total_deductions);

    if net_salary < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_SALARY".to_string(),
            message: format!(
                "Deductions {} exceed gross salary {}",
                total_deductions, gross_salary
            ),
            severity: "medium".to_string(),
        });
    }

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "aggregation".to_string(),
        rule_name: "Gross and Net Salary".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "allowances": allowances.to_string(),
            "paye_tax": paye.monthly_tax.to_string(),
            "nssf": nssf.contribution.to_string(),
            "nhif": nhif.contribution.to_string(),
            "housing_levy": housing_levy.levy.to_string(),
            "other_deductions": other_deductions.to_string()
        }),
        output: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "total_deductions": total_deductions.to_string(),
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "Gross {} - deductions {} = net {}",
            gross_salary, total_deductions, net_salary
        ),
    });

    Ok(PayrollComputation {
        result: PayrollResult {
            basic_salary,
            gross_salary,
            allowances,
            paye_tax: paye.monthly_tax,
            nssf: nssf.contribution,
            nhif: nhif.contribution,
            housing_levy: housing_levy.levy,
            other_deductions,
            total_deductions,
            net_salary,
            working_days: input.salary.working_days,
            days_worked: input.salary.days_worked,
        },
        audit_steps,
        warnings,
    })
}
