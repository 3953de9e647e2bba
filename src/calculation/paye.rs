//! PAYE income tax calculation.
//!
//! Monthly taxable income is annualised, taxed band by band against the
//! bracket set in effect, reduced once by the personal relief, and brought
//! back to a monthly figure.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayeSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TaxBracket, validate_bracket_set};

use super::round_money;

/// Months used to annualise a monthly income.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The result of a PAYE calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// Monthly taxable income times twelve.
    pub annual_income: Decimal,
    /// Annual tax before relief.
    pub annual_tax_before_relief: Decimal,
    /// Annual tax after relief, never negative.
    pub annual_tax: Decimal,
    /// Monthly tax, rounded to two decimal places.
    pub monthly_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates monthly PAYE for a monthly taxable income.
///
/// `brackets` must be the bracket set in effect on `as_of`. An empty set is
/// a `MissingTaxConfiguration` error; a set that is not contiguous is an
/// `InvalidConfiguration` error.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_paye;
/// use payroll_engine::config::PayeSettings;
/// use payroll_engine::models::TaxBracket;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// let brackets = vec![TaxBracket {
///     min_amount: Decimal::ZERO,
///     max_amount: None,
///     rate: Decimal::from(10),
///     effective_date: date,
///     active: true,
/// }];
/// let settings = PayeSettings { personal_relief: Decimal::from(2400) };
///
/// let result = calculate_paye(Decimal::from(24_000), &brackets, &settings, date, 1).unwrap();
/// assert_eq!(result.monthly_tax, Decimal::from(2_200));
/// ```
pub fn calculate_paye(
    monthly_taxable_income: Decimal,
    brackets: &[TaxBracket],
    settings: &PayeSettings,
    as_of: NaiveDate,
    step_number: u32,
) -> EngineResult<PayeResult> {
    if brackets.is_empty() {
        return Err(EngineError::MissingTaxConfiguration { date: as_of });
    }

    let mut sorted = brackets.to_vec();
    sorted.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));
    validate_bracket_set(&sorted)?;

    let months = Decimal::from(MONTHS_PER_YEAR);
    let annual_income = monthly_taxable_income * months;

    let mut annual_tax_before_relief = Decimal::ZERO;
    let mut band_details = Vec::new();
    for bracket in &sorted {
        let portion = bracket.taxable_portion(annual_income);
        if portion <= Decimal::ZERO {
            continue;
        }
        let band_tax = portion * bracket.rate / Decimal::ONE_HUNDRED;
        annual_tax_before_relief += band_tax;
        band_details.push(serde_json::json!({
            "min_amount": bracket.min_amount.to_string(),
            "max_amount": bracket.max_amount.map(|m| m.to_string()),
            "rate": bracket.rate.normalize().to_string(),
            "taxable": portion.to_string(),
            "tax": band_tax.normalize().to_string()
        }));
    }

    let annual_tax = (annual_tax_before_relief - settings.personal_relief).max(Decimal::ZERO);
    let monthly_tax = round_money(annual_tax / months);

    let audit_step = AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        input: serde_json::json!({
            "monthly_taxable_income": monthly_taxable_income.to_string(),
            "as_of": as_of.to_string(),
            "bracket_effective_date": sorted[0].effective_date.to_string(),
            "personal_relief": settings.personal_relief.to_string()
        }),
        output: serde_json::json!({
            "annual_income": annual_income.to_string(),
            "bands": band_details,
            "annual_tax_before_relief": annual_tax_before_relief.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_tax": monthly_tax.to_string()
        }),
        reasoning: format!(
            "Annual income {} taxed {} across brackets, less relief {} = {}; / 12 = {}",
            annual_income.normalize(),
            annual_tax_before_relief.normalize(),
            settings.personal_relief.normalize(),
            annual_tax.normalize(),
            monthly_tax
        ),
    };

    Ok(PayeResult {
        annual_income,
        annual_tax_before_relief,
        annual_tax,
        monthly_tax,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    fn settings() -> PayeSettings {
        PayeSettings {
            personal_relief: dec("2400"),
        }
    }

    fn kenya_brackets() -> Vec<TaxBracket> {
        let effective_date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        [
            ("0", Some("288000"), "10"),
            ("288000", Some("388000"), "25"),
            ("388000", Some("6000000"), "30"),
            ("6000000", Some("9600000"), "32.5"),
            ("9600000", None, "35"),
        ]
        .into_iter()
        .map(|(min, max, rate)| TaxBracket {
            min_amount: dec(min),
            max_amount: max.map(dec),
            rate: dec(rate),
            effective_date,
            active: true,
        })
        .collect()
    }

    #[test]
    fn test_lowest_bracket_only() {
        // 24000 * 12 = 288000 -> 28800 - 2400 = 26400 / 12 = 2200
        let result = calculate_paye(dec("24000"), &kenya_brackets(), &settings(), as_of(), 1).unwrap();

        assert_eq!(result.annual_income, dec("288000"));
        assert_eq!(result.annual_tax_before_relief, dec("28800"));
        assert_eq!(result.monthly_tax, dec("2200.00"));
    }

    #[test]
    fn test_spans_three_brackets() {
        // 600000: 28800 + 25000 + 63600 = 117400 - 2400 = 115000 / 12
        let result = calculate_paye(dec("50000"), &kenya_brackets(), &settings(), as_of(), 1).unwrap();

        assert_eq!(result.annual_tax_before_relief, dec("117400"));
        assert_eq!(result.annual_tax, dec("115000"));
        assert_eq!(result.monthly_tax, dec("9583.33"));
    }

    #[test]
    fn test_top_bracket_is_unbounded() {
        // 1000000 * 12 = 12000000
        // 28800 + 25000 + 1683600 + 1170000 + 840000 = 3747400 - 2400 = 3745000 / 12
        let result =
            calculate_paye(dec("1000000"), &kenya_brackets(), &settings(), as_of(), 1).unwrap();

        assert_eq!(result.annual_tax_before_relief, dec("3747400"));
        assert_eq!(result.monthly_tax, dec("312083.33"));
    }

    #[test]
    fn test_relief_clamps_tax_at_zero() {
        // 1000 * 12 = 12000 -> 1200 - 2400 < 0
        let result = calculate_paye(dec("1000"), &kenya_brackets(), &settings(), as_of(), 1).unwrap();

        assert_eq!(result.annual_tax, Decimal::ZERO);
        assert_eq!(result.monthly_tax, dec("0.00"));
    }

    #[test]
    fn test_relief_applied_once_not_per_bracket() {
        let result = calculate_paye(dec("40000"), &kenya_brackets(), &settings(), as_of(), 1).unwrap();
        assert_eq!(
            result.annual_tax,
            result.annual_tax_before_relief - dec("2400")
        );
    }

    #[test]
    fn test_unsorted_brackets_are_sorted_before_use() {
        let mut brackets = kenya_brackets();
        brackets.reverse();
        let result = calculate_paye(dec("50000"), &brackets, &settings(), as_of(), 1).unwrap();
        assert_eq!(result.monthly_tax, dec("9583.33"));
    }

    #[test]
    fn test_no_brackets_is_missing_configuration() {
        match calculate_paye(dec("50000"), &[], &settings(), as_of(), 1) {
            Err(EngineError::MissingTaxConfiguration { date }) => assert_eq!(date, as_of()),
            other => panic!("Expected MissingTaxConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_gap_in_brackets_is_invalid_configuration() {
        let mut brackets = kenya_brackets();
        brackets.remove(1);
        assert!(matches!(
            calculate_paye(dec("50000"), &brackets, &settings(), as_of(), 1),
            Err(EngineError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_audit_step_lists_taxed_bands() {
        let result = calculate_paye(dec("50000"), &kenya_brackets(), &settings(), as_of(), 4).unwrap();

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "paye");
        assert_eq!(result.audit_step.output["bands"].as_array().unwrap().len(), 3);
        assert_eq!(result.audit_step.output["monthly_tax"], "9583.33");
    }
}
