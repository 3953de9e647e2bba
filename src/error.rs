//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. The engine never swallows these;
//! callers decide how to present them.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::MissingSalaryRecord {
///     employee_id: "EMP001".to_string(),
/// };
/// assert_eq!(error.to_string(), "No active salary record for employee: EMP001");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A calculation input was out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending input field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No active salary exists for the employee.
    #[error("No active salary record for employee: {employee_id}")]
    MissingSalaryRecord {
        /// The employee that was looked up.
        employee_id: String,
    },

    /// No active tax bracket set is in effect on the date.
    #[error("No active tax brackets in effect on {date}")]
    MissingTaxConfiguration {
        /// The date the brackets were requested for.
        date: NaiveDate,
    },

    /// No NHIF band schedule is in effect on the date.
    #[error("No NHIF band schedule in effect on {date}")]
    NhifScheduleNotFound {
        /// The date the schedule was requested for.
        date: NaiveDate,
    },

    /// Configuration was loaded but is internally inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of the inconsistency.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("days_worked", "must not exceed working_days");
        assert_eq!(
            error.to_string(),
            "Invalid input 'days_worked': must not exceed working_days"
        );
    }

    #[test]
    fn test_missing_tax_configuration_displays_date() {
        let error = EngineError::MissingTaxConfiguration {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No active tax brackets in effect on 2020-01-01"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_nhif_schedule_not_found_displays_date() {
        let error = EngineError::NhifScheduleNotFound {
            date: NaiveDate::from_ymd_opt(2010, 6, 30).unwrap(),
        };
        assert_eq!(error.to_string(), "No NHIF band schedule in effect on 2010-06-30");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_salary() -> EngineResult<()> {
            Err(EngineError::MissingSalaryRecord {
                employee_id: "EMP404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_salary()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::MissingSalaryRecord { .. })
        ));
    }
}
