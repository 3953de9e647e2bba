//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! payroll configuration from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

use super::types::{NhifSchedule, PayrollConfig, StatutoryConfig};

/// Name of the directory holding PAYE bracket files.
pub const TAX_BRACKETS_DIR: &str = "tax_brackets";

/// Loads and provides access to statutory configuration.
///
/// # Directory Structure
///
/// ```text
/// config/kenya/
/// ├── statutory.yaml       # PAYE relief, NSSF and Housing Levy parameters
/// ├── nhif/
/// │   └── 2015-04-01.yaml  # NHIF bands effective from this date
/// └── tax_brackets/
///     └── 2023-07-01.yaml  # PAYE brackets, read on every calculation
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/kenya").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// let schedule = loader.nhif_schedule(date).unwrap();
/// println!("{} NHIF bands", schedule.bands.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if statutory.yaml or the nhif directory is missing,
    /// if any file contains invalid YAML, or if an NHIF schedule is empty.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let statutory = load_yaml::<StatutoryConfig>(&path.join("statutory.yaml"))?;
        let nhif_dir = path.join("nhif");
        let nhif_schedules = load_yaml_dir::<NhifSchedule>(&nhif_dir)?;

        if nhif_schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no yaml files found)", nhif_dir.display()),
            });
        }
        if let Some(empty) = nhif_schedules.iter().find(|s| s.bands.is_empty()) {
            return Err(EngineError::InvalidConfiguration {
                message: format!("NHIF schedule {} has no bands", empty.effective_date),
            });
        }

        Ok(Self {
            root: path.to_path_buf(),
            config: PayrollConfig::new(statutory, nhif_schedules),
        })
    }

    /// Returns the directory holding PAYE bracket files.
    pub fn tax_brackets_dir(&self) -> PathBuf {
        self.root.join(TAX_BRACKETS_DIR)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the statutory parameters.
    pub fn statutory(&self) -> &StatutoryConfig {
        self.config.statutory()
    }

    /// Gets the NHIF schedule in effect on a given date.
    ///
    /// The method finds the most recent schedule that is effective on or
    /// before the given date.
    pub fn nhif_schedule(&self, date: NaiveDate) -> EngineResult<&NhifSchedule> {
        self.config
            .nhif_schedules()
            .iter()
            .rfind(|s| s.effective_date <= date)
            .ok_or(EngineError::NhifScheduleNotFound { date })
    }
}

/// Loads and parses a YAML file.
pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}

/// Loads every `.yaml` file in a directory.
///
/// A missing directory is `ConfigNotFound`; a directory without YAML files
/// yields an empty vector.
pub(crate) fn load_yaml_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> EngineResult<Vec<T>> {
    let dir_str = dir.display().to_string();

    if !dir.exists() {
        return Err(EngineError::ConfigNotFound { path: dir_str });
    }

    let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
        path: dir_str.clone(),
    })?;

    let mut items = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "yaml") {
            items.push(load_yaml::<T>(&path)?);
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/kenya"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.statutory().jurisdiction.code, "KE");
        assert_eq!(loader.statutory().jurisdiction.currency, "KES");
    }

    #[test]
    fn test_statutory_parameters_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let statutory = loader.statutory();

        assert_eq!(statutory.paye.personal_relief, dec("2400"));
        assert_eq!(statutory.nssf.rate, dec("0.06"));
        assert_eq!(statutory.nssf.tier_one_ceiling, dec("7000"));
        assert_eq!(statutory.nssf.tier_two_span(), dec("29000"));
        assert_eq!(statutory.housing_levy.rate, dec("0.015"));
        assert_eq!(statutory.housing_levy.cap, dec("2500"));
    }

    #[test]
    fn test_nhif_schedule_has_full_band_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

        let schedule = loader.nhif_schedule(date).unwrap();
        assert_eq!(schedule.bands.len(), 17);
        assert_eq!(schedule.bands[0].lower_bound, Decimal::ZERO);
        assert_eq!(schedule.bands[0].upper_bound, Some(dec("5999")));
        assert_eq!(schedule.bands[16].upper_bound, None);
        assert_eq!(schedule.bands[16].contribution, dec("1700"));
    }

    #[test]
    fn test_nhif_schedule_not_found_before_effective_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();

        match loader.nhif_schedule(date) {
            Err(EngineError::NhifScheduleNotFound { date: d }) => assert_eq!(d, date),
            other => panic!("Expected NhifScheduleNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_tax_brackets_dir_is_under_root() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.tax_brackets_dir().ends_with("tax_brackets"));
    }

    #[test]
    fn test_empty_nhif_directory_returns_error() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::copy(
            format!("{}/statutory.yaml", config_path()),
            dir.path().join("statutory.yaml"),
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("nhif")).unwrap();

        match ConfigLoader::load(dir.path()) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("nhif")),
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("statutory.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }
}
