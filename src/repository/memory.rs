//! In-memory repositories.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{SalaryRecord, TaxBracket, effective_bracket_set, select_active_salary};

use super::{SalaryRepository, TaxBracketRepository};

/// Salary records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySalaryRepository {
    records: Vec<SalaryRecord>,
}

impl InMemorySalaryRepository {
    /// Creates a repository over the given records.
    pub fn new(records: Vec<SalaryRecord>) -> Self {
        Self { records }
    }

    /// Adds a record.
    pub fn with_record(mut self, record: SalaryRecord) -> Self {
        self.records.push(record);
        self
    }
}

impl SalaryRepository for InMemorySalaryRepository {
    fn active_salary(&self, employee_id: &str) -> EngineResult<Option<SalaryRecord>> {
        Ok(select_active_salary(&self.records, employee_id).cloned())
    }
}

/// Tax bracket rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaxBracketRepository {
    rows: Vec<TaxBracket>,
}

impl InMemoryTaxBracketRepository {
    /// Creates a repository over the given rows.
    pub fn new(rows: Vec<TaxBracket>) -> Self {
        Self { rows }
    }
}

impl TaxBracketRepository for InMemoryTaxBracketRepository {
    fn active_tax_brackets(&self, as_of: NaiveDate) -> EngineResult<Vec<TaxBracket>> {
        Ok(effective_bracket_set(&self.rows, as_of))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_salary_lookup() {
        let repo = InMemorySalaryRepository::default()
            .with_record(SalaryRecord {
                employee_id: "EMP001".to_string(),
                basic_salary: Decimal::from(50_000),
                effective_date: date(2024, 1, 1),
                active: true,
            })
            .with_record(SalaryRecord {
                employee_id: "EMP002".to_string(),
                basic_salary: Decimal::from(30_000),
                effective_date: date(2024, 1, 1),
                active: false,
            });

        let salary = repo.active_salary("EMP001").unwrap().unwrap();
        assert_eq!(salary.basic_salary, Decimal::from(50_000));
        assert!(repo.active_salary("EMP002").unwrap().is_none());
        assert!(repo.active_salary("EMP003").unwrap().is_none());
    }

    #[test]
    fn test_bracket_lookup_by_date() {
        let repo = InMemoryTaxBracketRepository::new(vec![TaxBracket {
            min_amount: Decimal::ZERO,
            max_amount: None,
            rate: Decimal::from(10),
            effective_date: date(2023, 7, 1),
            active: true,
        }]);

        assert_eq!(repo.active_tax_brackets(date(2024, 1, 1)).unwrap().len(), 1);
        assert!(repo.active_tax_brackets(date(2023, 1, 1)).unwrap().is_empty());
    }
}
