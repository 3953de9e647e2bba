//! YAML-file-backed repositories.
//!
//! Both repositories read their files on every call, so edits to bracket or
//! salary files take effect on the next calculation without a restart.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{SalaryRoster, TaxBracketFile, load_yaml, load_yaml_dir};
use crate::error::EngineResult;
use crate::models::{SalaryRecord, TaxBracket, effective_bracket_set, select_active_salary};

use super::{SalaryRepository, TaxBracketRepository};

/// Reads PAYE brackets from a directory of YAML files.
///
/// Each file holds one bracket set and its effective date:
///
/// ```yaml
/// effective_date: 2023-07-01
/// brackets:
///   - { min_amount: "0", max_amount: "288000", rate: "10" }
///   - { min_amount: "288000", rate: "25" }
/// ```
#[derive(Debug, Clone)]
pub struct YamlTaxBracketRepository {
    dir: PathBuf,
}

impl YamlTaxBracketRepository {
    /// Creates a repository reading from `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn load_rows(&self) -> EngineResult<Vec<TaxBracket>> {
        let files = load_yaml_dir::<TaxBracketFile>(&self.dir)?;
        Ok(files
            .into_iter()
            .flat_map(|file| {
                let effective_date = file.effective_date;
                file.brackets.into_iter().map(move |entry| TaxBracket {
                    min_amount: entry.min_amount,
                    max_amount: entry.max_amount,
                    rate: entry.rate,
                    effective_date,
                    active: entry.active,
                })
            })
            .collect())
    }
}

impl TaxBracketRepository for YamlTaxBracketRepository {
    fn active_tax_brackets(&self, as_of: NaiveDate) -> EngineResult<Vec<TaxBracket>> {
        let rows = self.load_rows()?;
        let set = effective_bracket_set(&rows, as_of);
        debug!(
            dir = %self.dir.display(),
            rows = rows.len(),
            selected = set.len(),
            as_of = %as_of,
            "Loaded tax brackets"
        );
        Ok(set)
    }
}

/// Reads salary records from a single YAML roster file.
#[derive(Debug, Clone)]
pub struct YamlSalaryRepository {
    path: PathBuf,
}

impl YamlSalaryRepository {
    /// Creates a repository reading from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SalaryRepository for YamlSalaryRepository {
    fn active_salary(&self, employee_id: &str) -> EngineResult<Option<SalaryRecord>> {
        let roster = load_yaml::<SalaryRoster>(&self.path)?;
        Ok(select_active_salary(&roster.salaries, employee_id).cloned())
    }
}
