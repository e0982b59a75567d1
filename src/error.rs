//! Error types for the Roster Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that can occur at the configuration and import
//! boundaries. Staffing shortfalls and refused off days are not errors; they
//! are reported through the decision and allocation result types.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Roster Engine.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A schedule snapshot could not be decoded.
    #[error("Failed to parse schedule snapshot: {message}")]
    SnapshotParseError {
        /// A description of the parse error.
        message: String,
    },

    /// An employee referenced by a request is not part of the roster.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that could not be resolved.
        id: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A raw import row was rejected at the import boundary.
    #[error("Invalid import row {row}: {message}")]
    InvalidImportRow {
        /// The 1-based row number in the import batch.
        row: usize,
        /// A description of what made the row invalid.
        message: String,
    },

    /// A manual task assignment duplicates an existing one.
    #[error("Employee '{employee_id}' is already assigned to aircraft '{aircraft_id}' on {date}")]
    DuplicateAssignment {
        /// The employee being assigned.
        employee_id: String,
        /// The aircraft the employee is already bound to.
        aircraft_id: String,
        /// The day of the assignment.
        date: NaiveDate,
    },

    /// A request was structurally valid but semantically unusable.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
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
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            id: "42".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: 42");
    }

    #[test]
    fn test_invalid_import_row_displays_row_and_message() {
        let error = EngineError::InvalidImportRow {
            row: 3,
            message: "unparseable date '31/02'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid import row 3: unparseable date '31/02'"
        );
    }

    #[test]
    fn test_duplicate_assignment_displays_context() {
        let error = EngineError::DuplicateAssignment {
            employee_id: "7".to_string(),
            aircraft_id: "a350-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Employee '7' is already assigned to aircraft 'a350-1' on 2026-03-02"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                id: "x".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
