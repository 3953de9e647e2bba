//! NSSF contribution calculation.
//!
//! Two tiers at the same rate: Tier I covers pay up to the first ceiling,
//! Tier II covers pay between the first and second ceilings.

use rust_decimal::Decimal;

use crate::config::NssfRates;
use crate::models::AuditStep;

use super::round_money;

/// The result of an NSSF calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct NssfResult {
    /// Tier I contribution.
    pub tier_one: Decimal,
    /// Tier II contribution.
    pub tier_two: Decimal,
    /// Total contribution, rounded to two decimal places.
    pub contribution: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the NSSF contribution on a basic salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_nssf;
/// use payroll_engine::config::NssfRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = NssfRates {
///     rate: Decimal::from_str("0.06").unwrap(),
///     tier_one_ceiling: Decimal::from(7_000),
///     tier_two_ceiling: Decimal::from(36_000),
/// };
///
/// let result = calculate_nssf(Decimal::from(10_000), &rates, 1);
/// assert_eq!(result.contribution, Decimal::from(600));
/// ```
pub fn calculate_nssf(basic_salary: Decimal, rates: &NssfRates, step_number: u32) -> NssfResult {
    let tier_one_base = basic_salary.min(rates.tier_one_ceiling).max(Decimal::ZERO);
    let tier_two_base = (basic_salary - rates.tier_one_ceiling)
        .max(Decimal::ZERO)
        .min(rates.tier_two_span());

    let tier_one = tier_one_base * rates.rate;
    let tier_two = tier_two_base * rates.rate;
    let contribution = round_money(tier_one + tier_two);

    let audit_step = AuditStep {
        step_number,
        rule_id: "nssf".to_string(),
        rule_name: "NSSF Contribution".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "rate": rates.rate.normalize().to_string(),
            "tier_one_ceiling": rates.tier_one_ceiling.to_string(),
            "tier_two_ceiling": rates.tier_two_ceiling.to_string()
        }),
        output: serde_json::json!({
            "tier_one": tier_one.normalize().to_string(),
            "tier_two": tier_two.normalize().to_string(),
            "contribution": contribution.to_string()
        }),
        reasoning: format!(
            "Tier I {} x {} = {}; Tier II {} x {} = {}; total {}",
            tier_one_base.normalize(),
            rates.rate.normalize(),
            tier_one.normalize(),
            tier_two_base.normalize(),
            rates.rate.normalize(),
            tier_two.normalize(),
            contribution
        ),
    };

    NssfResult {
        tier_one,
        tier_two,
        contribution,
        audit_step,
    }
}
