//! PAYE tax bracket model.
//!
//! Brackets are stored as individual rows, each carrying the date it takes
//! effect and an active flag. [`effective_bracket_set`] picks the single set
//! in effect on a date and [`validate_bracket_set`] checks it is contiguous.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single annual income band with its marginal rate.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxBracket;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let bracket = TaxBracket {
///     min_amount: Decimal::ZERO,
///     max_amount: Some(Decimal::from(288_000)),
///     rate: Decimal::from(10),
///     effective_date: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
///     active: true,
/// };
/// assert_eq!(bracket.taxable_portion(Decimal::from(300_000)), Decimal::from(288_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of annual income for this bracket.
    pub min_amount: Decimal,
    /// Upper bound of annual income, `None` when unbounded.
    pub max_amount: Option<Decimal>,
    /// Marginal rate as a percentage (e.g. 25 for 25%).
    pub rate: Decimal,
    /// The date this bracket takes effect.
    pub effective_date: NaiveDate,
    /// Whether this bracket is active.
    pub active: bool,
}

impl TaxBracket {
    /// Returns the part of `annual_income` that falls inside this bracket.
    pub fn taxable_portion(&self, annual_income: Decimal) -> Decimal {
        if annual_income <= self.min_amount {
            return Decimal::ZERO;
        }
        let upper = match self.max_amount {
            Some(max) => annual_income.min(max),
            None => annual_income,
        };
        (upper - self.min_amount).max(Decimal::ZERO)
    }
}

/// Selects the bracket set in effect on `as_of`, sorted by `min_amount`.
///
/// Only active rows effective on or before the date are considered, and of
/// those only the rows sharing the latest effective date. An empty result
/// means no configuration is in effect.
pub fn effective_bracket_set(rows: &[TaxBracket], as_of: NaiveDate) -> Vec<TaxBracket> {
    let latest = rows
        .iter()
        .filter(|b| b.active && b.effective_date <= as_of)
        .map(|b| b.effective_date)
        .max();

    let Some(latest) = latest else {
        return Vec::new();
    };

    let mut set: Vec<TaxBracket> = rows
        .iter()
        .filter(|b| b.active && b.effective_date == latest)
        .cloned()
        .collect();
    set.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));
    set
}

/// Checks that a sorted bracket set is contiguous and non-overlapping.
pub fn validate_bracket_set(brackets: &[TaxBracket]) -> EngineResult<()> {
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "tax bracket starting at {} has rate {} outside 0-100",
                    bracket.min_amount, bracket.rate
                ),
            });
        }

        let is_last = index + 1 == brackets.len();
        match (bracket.max_amount, brackets.get(index + 1)) {
            (Some(max), _) if max <= bracket.min_amount => {
                return Err(EngineError::InvalidConfiguration {
                    message: format!(
                        "tax bracket {}-{} has an empty range",
                        bracket.min_amount, max
                    ),
                });
            }
            (Some(max), Some(next)) if max != next.min_amount => {
                return Err(EngineError::InvalidConfiguration {
                    message: format!(
                        "tax bracket ending at {} is not contiguous with bracket starting at {}",
                        max, next.min_amount
                    ),
                });
            }
            (None, _) if !is_last => {
                return Err(EngineError::InvalidConfiguration {
                    message: format!(
                        "unbounded tax bracket starting at {} must be the last bracket",
                        bracket.min_amount
                    ),
                });
            }
            _ => {}
        }
    }
    Ok(())
}
