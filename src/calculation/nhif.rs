//! NHIF contribution lookup.
//!
//! NHIF is a flat amount chosen by the band the gross salary falls in. A band
//! covers its lower bound up to, but excluding, the next band's lower bound,
//! so fractional salaries between two configured bounds (e.g. 5999.50) stay in
//! the lower band. The top band is unbounded.

use rust_decimal::Decimal;

use crate::config::{NhifBand, NhifSchedule};
use crate::models::{AuditStep, AuditWarning};

use super::round_money;

/// Warning code emitted when no band covers the gross salary.
pub const NHIF_NO_BAND_WARNING: &str = "NHIF_NO_MATCHING_BAND";

/// The result of an NHIF lookup, including the audit step.
#[derive(Debug, Clone)]
pub struct NhifResult {
    /// The flat contribution, zero when no band matched.
    pub contribution: Decimal,
    /// The band that matched.
    pub band: Option<NhifBand>,
    /// Set when no band matched.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Finds the band covering `gross_salary` in a sorted band table.
pub fn find_nhif_band(gross_salary: Decimal, bands: &[NhifBand]) -> Option<&NhifBand> {
    bands.iter().enumerate().find_map(|(index, band)| {
        if gross_salary < band.lower_bound {
            return None;
        }
        let below_next = match bands.get(index + 1) {
            Some(next) => gross_salary < next.lower_bound,
            None => band.upper_bound.is_none_or(|upper| gross_salary <= upper),
        };
        below_next.then_some(band)
    })
}

/// Looks up the NHIF contribution for a gross salary.
///
/// Returns a zero contribution with a warning if no band matches.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_nhif;
/// use payroll_engine::config::{NhifBand, NhifSchedule};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let schedule = NhifSchedule {
///     effective_date: NaiveDate::from_ymd_opt(2015, 4, 1).unwrap(),
///     bands: vec![
///         NhifBand { lower_bound: Decimal::ZERO, upper_bound: Some(Decimal::from(5_999)), contribution: Decimal::from(150) },
///         NhifBand { lower_bound: Decimal::from(6_000), upper_bound: None, contribution: Decimal::from(300) },
///     ],
/// };
///
/// let result = calculate_nhif(Decimal::from(6_000), &schedule, 1);
/// assert_eq!(result.contribution, Decimal::from(300));
/// ```
pub fn calculate_nhif(gross_salary: Decimal, schedule: &NhifSchedule, step_number: u32) -> NhifResult {
    let band = find_nhif_band(gross_salary, &schedule.bands).cloned();

    let input = serde_json::json!({
        "gross_salary": gross_salary.to_string(),
        "schedule_effective_date": schedule.effective_date.to_string()
    });

    match band {
        Some(band) => {
            let contribution = round_money(band.contribution);
            let audit_step = AuditStep {
                step_number,
                rule_id: "nhif".to_string(),
                rule_name: "NHIF Contribution".to_string(),
                input,
                output: serde_json::json!({
                    "band_lower_bound": band.lower_bound.to_string(),
                    "band_upper_bound": band.upper_bound.map(|u| u.to_string()),
                    "contribution": contribution.to_string()
                }),
                reasoning: match band.upper_bound {
                    Some(upper) => format!(
                        "Gross {} falls in band {}-{}: {}",
                        gross_salary, band.lower_bound, upper, contribution
                    ),
                    None => format!(
                        "Gross {} falls in top band {}+: {}",
                        gross_salary, band.lower_bound, contribution
                    ),
                },
            };

            NhifResult {
                contribution,
                band: Some(band),
                warning: None,
                audit_step,
            }
        }
        None => {
            let contribution = round_money(Decimal::ZERO);
            let audit_step = AuditStep {
                step_number,
                rule_id: "nhif".to_string(),
                rule_name: "NHIF Contribution".to_string(),
                input,
                output: serde_json::json!({
                    "band_lower_bound": null,
                    "band_upper_bound": null,
                    "contribution": contribution.to_string()
                }),
                reasoning: format!("No NHIF band covers gross {}, contribution 0", gross_salary),
            };

            NhifResult {
                contribution,
                band: None,
                warning: Some(AuditWarning {
                    code: NHIF_NO_BAND_WARNING.to_string(),
                    message: format!("No NHIF band covers gross salary {}", gross_salary),
                    severity: "high".to_string(),
                }),
                audit_step,
            }
        }
    }
}
