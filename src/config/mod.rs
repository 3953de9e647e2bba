//! Configuration loading and management for the payroll engine.
//!
//! This module loads statutory parameters (PAYE relief, NSSF tiers, Housing
//! Levy) and versioned NHIF band schedules from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kenya").unwrap();
//! println!("Loaded: {}", config.statutory().jurisdiction.name);
//! ```

mod loader;
mod types;

pub(crate) use loader::{load_yaml, load_yaml_dir};
pub use loader::{ConfigLoader, TAX_BRACKETS_DIR};
pub use types::{
    HousingLevyRates, JurisdictionMetadata, NhifBand, NhifSchedule, NssfRates, PayeSettings,
    PayrollConfig, SalaryRoster, StatutoryConfig, TaxBracketEntry, TaxBracketFile,
};
