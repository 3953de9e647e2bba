//! Housing Levy calculation.

use rust_decimal::Decimal;

use crate::config::HousingLevyRates;
use crate::models::AuditStep;

use super::round_money;

/// The result of a Housing Levy calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HousingLevyResult {
    /// The levy, rounded to two decimal places.
    pub levy: Decimal,
    /// Whether the cap limited the levy.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the Housing Levy on a basic salary, capped at the configured
/// maximum.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_housing_levy;
/// use payroll_engine::config::HousingLevyRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = HousingLevyRates {
///     rate: Decimal::from_str("0.015").unwrap(),
///     cap: Decimal::from(2_500),
/// };
///
/// let result = calculate_housing_levy(Decimal::from(10_000), &rates, 1);
/// assert_eq!(result.levy, Decimal::from(150));
/// ```
pub fn calculate_housing_levy(
    basic_salary: Decimal,
    rates: &HousingLevyRates,
    step_number: u32,
) -> HousingLevyResult {
    let uncapped = basic_salary * rates.rate;
    let (levy, cap_applied) = if uncapped > rates.cap {
        (round_money(rates.cap), true)
    } else {
        (round_money(uncapped), false)
    };

    let reasoning = if cap_applied {
        format!(
            "{} x {} = {} (capped at {})",
            basic_salary.normalize(),
            rates.rate.normalize(),
            uncapped.normalize(),
            levy
        )
    } else {
        format!(
            "{} x {} = {}",
            basic_salary.normalize(),
            rates.rate.normalize(),
            levy
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "housing_levy".to_string(),
        rule_name: "Housing Levy".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "rate": rates.rate.normalize().to_string(),
            "cap": rates.cap.to_string()
        }),
        output: serde_json::json!({
            "levy": levy.to_string(),
            "cap_applied": cap_applied
        }),
        reasoning,
    };

    HousingLevyResult {
        levy,
        cap_applied,
        audit_step,
    }
}
