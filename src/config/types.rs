//! Configuration types for statutory deductions.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Identifies the jurisdiction and revision of the statutory parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Country code (e.g., "KE").
    pub code: String,
    /// Human-readable name of the parameter set.
    pub name: String,
    /// The version or effective date of the parameter set.
    pub version: String,
    /// Currency all amounts are expressed in.
    pub currency: String,
}

/// PAYE parameters that are not part of the bracket table.
#[derive(Debug, Clone, Deserialize)]
pub struct PayeSettings {
    /// Personal relief subtracted once from the annual tax.
    pub personal_relief: Decimal,
}

/// NSSF two-tier contribution parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct NssfRates {
    /// Contribution rate applied to both tiers (e.g., 0.06).
    pub rate: Decimal,
    /// Upper limit of pensionable pay for Tier I.
    pub tier_one_ceiling: Decimal,
    /// Upper limit of pensionable pay for Tier II.
    pub tier_two_ceiling: Decimal,
}

impl NssfRates {
    /// Width of the Tier II band (upper limit less the Tier I limit).
    pub fn tier_two_span(&self) -> Decimal {
        (self.tier_two_ceiling - self.tier_one_ceiling).max(Decimal::ZERO)
    }
}

/// Housing Levy parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct HousingLevyRates {
    /// Levy rate applied to the basic salary (e.g., 0.015).
    pub rate: Decimal,
    /// Maximum levy per period.
    pub cap: Decimal,
}

/// Statutory parameters from statutory.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryConfig {
    /// Jurisdiction metadata.
    pub jurisdiction: JurisdictionMetadata,
    /// PAYE settings.
    pub paye: PayeSettings,
    /// NSSF rates.
    pub nssf: NssfRates,
    /// Housing Levy rates.
    pub housing_levy: HousingLevyRates,
}

/// A single NHIF contribution band.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NhifBand {
    /// Lowest gross salary in the band (inclusive).
    pub lower_bound: Decimal,
    /// Highest gross salary in the band (inclusive), `None` for the top band.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Flat contribution for the band.
    pub contribution: Decimal,
}

/// An NHIF band table effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct NhifSchedule {
    /// The date this schedule takes effect.
    pub effective_date: NaiveDate,
    /// Bands ordered by lower bound.
    pub bands: Vec<NhifBand>,
}

/// PAYE bracket file structure (tax_brackets/*.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketFile {
    /// The date every bracket in the file takes effect.
    pub effective_date: NaiveDate,
    /// The brackets.
    pub brackets: Vec<TaxBracketEntry>,
}

/// A bracket row inside a [`TaxBracketFile`].
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracketEntry {
    /// Lower bound of annual income.
    pub min_amount: Decimal,
    /// Upper bound of annual income, absent when unbounded.
    #[serde(default)]
    pub max_amount: Option<Decimal>,
    /// Marginal rate as a percentage.
    pub rate: Decimal,
    /// Whether the bracket is active.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Salary roster file structure (salaries.yaml).
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryRoster {
    /// Salary rows.
    pub salaries: Vec<crate::models::SalaryRecord>,
}

/// The complete statutory configuration loaded from YAML files.
///
/// Tax brackets are not held here; they are fetched through a
/// [`TaxBracketRepository`](crate::repository::TaxBracketRepository) on
/// every calculation.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Statutory parameters.
    statutory: StatutoryConfig,
    /// NHIF schedules by effective date (sorted oldest first).
    nhif_schedules: Vec<NhifSchedule>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(statutory: StatutoryConfig, nhif_schedules: Vec<NhifSchedule>) -> Self {
        let mut sorted = nhif_schedules;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        for schedule in &mut sorted {
            schedule
                .bands
                .sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
        }
        Self {
            statutory,
            nhif_schedules: sorted,
        }
    }

    /// Returns the statutory parameters.
    pub fn statutory(&self) -> &StatutoryConfig {
        &self.statutory
    }

    /// Returns all NHIF schedules.
    pub fn nhif_schedules(&self) -> &[NhifSchedule] {
        &self.nhif_schedules
    }
}
