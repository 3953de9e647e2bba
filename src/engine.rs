//! The payroll engine.
//!
//! [`PayrollEngine`] ties the statutory configuration and the two data
//! repositories to the calculation pipeline. It is immutable once built and
//! can be shared between threads behind an `Arc`.

use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{PayrollComputation, compute_payroll, validate_salary_input};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, CalculationMode, PayrollCalculation, PayrollInput, SalaryInput};
use crate::repository::{SalaryRepository, TaxBracketRepository};

/// Computes payroll for stored employees and for ad-hoc previews.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::engine::PayrollEngine;
/// use payroll_engine::repository::{YamlSalaryRepository, YamlTaxBracketRepository};
///
/// let config = ConfigLoader::load("./config/kenya").unwrap();
/// let brackets = YamlTaxBracketRepository::new(config.tax_brackets_dir());
/// let salaries = YamlSalaryRepository::new("./config/kenya/salaries.yaml");
/// let engine = PayrollEngine::new(config, Arc::new(salaries), Arc::new(brackets));
///
/// let calculation = engine.calculate("EMP001", "2025-01", 22, 22).unwrap();
/// println!("net salary: {}", calculation.result.net_salary);
/// ```
#[derive(Clone)]
pub struct PayrollEngine {
    config: Arc<ConfigLoader>,
    salaries: Arc<dyn SalaryRepository>,
    tax_brackets: Arc<dyn TaxBracketRepository>,
}

impl PayrollEngine {
    /// Creates an engine over the given configuration and repositories.
    pub fn new(
        config: ConfigLoader,
        salaries: Arc<dyn SalaryRepository>,
        tax_brackets: Arc<dyn TaxBracketRepository>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            salaries,
            tax_brackets,
        }
    }

    /// Computes payroll for a stored employee using today's configuration.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` if the day counts are out of range
    /// * `MissingSalaryRecord` if the employee has no active salary
    /// * `MissingTaxConfiguration` if no brackets are in effect today
    pub fn calculate(
        &self,
        employee_id: &str,
        period_id: &str,
        working_days: i32,
        days_worked: i32,
    ) -> EngineResult<PayrollCalculation> {
        self.calculate_as_of(
            employee_id,
            period_id,
            working_days,
            days_worked,
            Utc::now().date_naive(),
        )
    }

    /// Computes payroll for a stored employee using the configuration in
    /// effect on `as_of`.
    pub fn calculate_as_of(
        &self,
        employee_id: &str,
        period_id: &str,
        working_days: i32,
        days_worked: i32,
        as_of: NaiveDate,
    ) -> EngineResult<PayrollCalculation> {
        let start_time = Instant::now();

        if employee_id.trim().is_empty() {
            return Err(EngineError::invalid_input("employee_id", "must not be empty"));
        }

        // Day counts are checked before touching storage.
        validate_salary_input(&SalaryInput::new(Decimal::ZERO, working_days, days_worked))?;

        let salary = self.salaries.active_salary(employee_id)?.ok_or_else(|| {
            EngineError::MissingSalaryRecord {
                employee_id: employee_id.to_string(),
            }
        })?;
        debug!(
            employee_id = %employee_id,
            basic_salary = %salary.basic_salary,
            effective_date = %salary.effective_date,
            "Resolved active salary"
        );

        let input = PayrollInput::new(SalaryInput::new(
            salary.basic_salary,
            working_days,
            days_worked,
        ));
        let computation = self.compute(&input, as_of)?;

        let calculation = build_calculation(
            CalculationMode::Processing,
            Some(employee_id.to_string()),
            Some(period_id.to_string()),
            as_of,
            computation,
            start_time,
        );

        info!(
            calculation_id = %calculation.calculation_id,
            employee_id = %employee_id,
            period_id = %period_id,
            net_salary = %calculation.result.net_salary,
            duration_us = calculation.audit_trace.duration_us,
            "Payroll processed"
        );

        Ok(calculation)
    }

    /// Computes payroll for a caller-supplied salary using today's
    /// configuration.
    pub fn preview(&self, input: &PayrollInput) -> EngineResult<PayrollCalculation> {
        self.preview_as_of(input, Utc::now().date_naive())
    }

    /// Computes payroll for a caller-supplied salary using the
    /// configuration in effect on `as_of`.
    pub fn preview_as_of(
        &self,
        input: &PayrollInput,
        as_of: NaiveDate,
    ) -> EngineResult<PayrollCalculation> {
        let start_time = Instant::now();
        let computation = self.compute(input, as_of)?;

        let calculation = build_calculation(
            CalculationMode::Preview,
            None,
            None,
            as_of,
            computation,
            start_time,
        );

        info!(
            calculation_id = %calculation.calculation_id,
            net_salary = %calculation.result.net_salary,
            duration_us = calculation.audit_trace.duration_us,
            "Payroll preview computed"
        );

        Ok(calculation)
    }

    fn compute(&self, input: &PayrollInput, as_of: NaiveDate) -> EngineResult<PayrollComputation> {
        let brackets = self.tax_brackets.active_tax_brackets(as_of)?;
        let nhif_schedule = self.config.nhif_schedule(as_of)?;

        compute_payroll(
            input,
            as_of,
            &brackets,
            self.config.statutory(),
            nhif_schedule,
        )
    }
}

fn build_calculation(
    mode: CalculationMode,
    employee_id: Option<String>,
    period_id: Option<String>,
    as_of: NaiveDate,
    computation: PayrollComputation,
    start_time: Instant,
) -> PayrollCalculation {
    PayrollCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        mode,
        employee_id,
        period_id,
        as_of,
        result: computation.result,
        audit_trace: AuditTrace {
            steps: computation.audit_steps,
            warnings: computation.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}
