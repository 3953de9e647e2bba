//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every monetary output carries.
pub const MONEY_DP: u32 = 2;

/// Rounds an amount to two decimal places, halves away from zero.
///
/// The result always carries a scale of two so that serialized figures read
/// `750.00` rather than `750`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("9583.335").unwrap()).to_string(), "9583.34");
/// assert_eq!(round_money(Decimal::from(750)).to_string(), "750.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}
