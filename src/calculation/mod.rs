//! Calculation logic for the payroll engine.
//!
//! This module contains the statutory calculators (PAYE, NSSF, NHIF, Housing
//! Levy), salary pro-ration, monetary rounding, and the aggregation that
//! combines them into a payroll result.

mod housing_levy;
mod nhif;
mod nssf;
mod paye;
mod payroll;
mod proration;
mod rounding;

pub use housing_levy::{HousingLevyResult, calculate_housing_levy};
pub use nhif::{NHIF_NO_BAND_WARNING, NhifResult, calculate_nhif, find_nhif_band};
pub use nssf::{NssfResult, calculate_nssf};
pub use paye::{MONTHS_PER_YEAR, PayeResult, calculate_paye};
pub use payroll::{PayrollComputation, compute_payroll};
pub use proration::{
    MAX_MONEY_AMOUNT, ProrationResult, prorate_salary, validate_payroll_input,
    validate_salary_input,
};
pub use rounding::{MONEY_DP, round_money};
