//! Data-access interfaces the engine depends on.
//!
//! Salaries and tax brackets live in storage owned by the surrounding HR
//! system. The engine reaches them only through the traits below, so it can
//! be backed by a database, YAML files, or in-memory fixtures.

mod memory;
mod yaml;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{SalaryRecord, TaxBracket};

pub use memory::{InMemorySalaryRepository, InMemoryTaxBracketRepository};
pub use yaml::{YamlSalaryRepository, YamlTaxBracketRepository};

/// Source of employee salary records.
pub trait SalaryRepository: Send + Sync {
    /// Returns the employee's active salary, or `None` if there is none.
    fn active_salary(&self, employee_id: &str) -> EngineResult<Option<SalaryRecord>>;
}

/// Source of PAYE tax brackets.
pub trait TaxBracketRepository: Send + Sync {
    /// Returns the bracket set in effect on `as_of`, sorted by `min_amount`.
    ///
    /// An empty vector means no brackets are configured for the date.
    fn active_tax_brackets(&self, as_of: NaiveDate) -> EngineResult<Vec<TaxBracket>>;
}
