//! JSON snapshot export and import.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, ScheduleSnapshot, ShiftAssignment};

/// Format version written by [`ScheduleSnapshot::to_json`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout of an exported snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFile {
    employees: Vec<Employee>,
    assignments: Vec<ShiftAssignment>,
    #[serde(default)]
    target_overrides: BTreeMap<NaiveDate, Decimal>,
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    exported_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl ScheduleSnapshot {
    /// Decodes and validates an exported snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SnapshotParseError`] for malformed JSON or an
    /// unsupported version, and [`EngineError::InvalidEmployee`] when the
    /// roster fails [`validate_roster`].
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::models::ScheduleSnapshot;
    ///
    /// let json = r#"{"employees": [], "assignments": [], "version": 1}"#;
    /// let snapshot = ScheduleSnapshot::from_json(json).unwrap();
    /// assert!(snapshot.employees.is_empty());
    /// ```
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let file: SnapshotFile =
            serde_json::from_str(json).map_err(|e| EngineError::SnapshotParseError {
                message: e.to_string(),
            })?;
        if file.version != SNAPSHOT_VERSION {
            return Err(EngineError::SnapshotParseError {
                message: format!(
                    "unsupported snapshot version {} (expected {})",
                    file.version, SNAPSHOT_VERSION
                ),
            });
        }
        validate_roster(&file.employees)?;
        Ok(Self {
            employees: file.employees,
            assignments: file.assignments,
            target_overrides: file.target_overrides,
        })
    }

    /// Encodes the snapshot in the export format, stamped with the current
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SnapshotParseError`] if encoding fails.
    pub fn to_json(&self) -> EngineResult<String> {
        let file = SnapshotFile {
            employees: self.employees.clone(),
            assignments: self.assignments.clone(),
            target_overrides: self.target_overrides.clone(),
            version: SNAPSHOT_VERSION,
            exported_at: Some(Utc::now()),
        };
        serde_json::to_string_pretty(&file).map_err(|e| EngineError::SnapshotParseError {
            message: e.to_string(),
        })
    }
}

/// Checks roster integrity: grades within 0..=100, unique ids and unique
/// initials.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmployee`] naming the offending field.
pub fn validate_roster(employees: &[Employee]) -> EngineResult<()> {
    let mut ids = HashSet::new();
    let mut initials = HashSet::new();
    for employee in employees {
        if employee.grade > 100 {
            return Err(EngineError::InvalidEmployee {
                field: "grade".to_string(),
                message: format!(
                    "employee {} has grade {}, must be between 0 and 100",
                    employee.id, employee.grade
                ),
            });
        }
        if !ids.insert(employee.id.as_str()) {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: format!("duplicate employee id {}", employee.id),
            });
        }
        if !initials.insert(employee.initials.to_ascii_uppercase()) {
            return Err(EngineError::InvalidEmployee {
                field: "initials".to_string(),
                message: format!("duplicate initials {}", employee.initials),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use std::collections::BTreeSet;

    fn create_test_employee(id: &str, initials: &str, grade: u8) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            initials: initials.to_string(),
            department: "S/TMBAA".to_string(),
            role: Role::Engineer,
            grade,
            skills: vec![],
            certifications: vec![],
            special_skills: BTreeSet::new(),
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_export_then_import_keeps_schedule() {
        let mut snapshot = ScheduleSnapshot::new(
            vec![create_test_employee("1", "MEAN", 80)],
            vec![ShiftAssignment::new(test_date(), "1", "Ea")],
        );
        snapshot
            .target_overrides
            .insert(test_date(), Decimal::from(150));

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"exported_at\""));
        assert!(json.contains("\"version\": 1"));

        let restored = ScheduleSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_import_accepts_file_without_metadata() {
        let json = r#"{
            "employees": [],
            "assignments": [
                {"date": "2026-01-15", "employee_id": "1", "shift_code": "La"}
            ]
        }"#;
        let snapshot = ScheduleSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.assignments.len(), 1);
        assert!(snapshot.target_overrides.is_empty());
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let result = ScheduleSnapshot::from_json("{\"employees\": [");
        assert!(matches!(result, Err(EngineError::SnapshotParseError { .. })));
    }

    #[test]
    fn test_import_rejects_unknown_version() {
        let json = r#"{"employees": [], "assignments": [], "version": 2}"#;
        match ScheduleSnapshot::from_json(json) {
            Err(EngineError::SnapshotParseError { message }) => {
                assert!(message.contains("version 2"));
            }
            other => panic!("Expected SnapshotParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_roster_rejects_grade_over_100() {
        let result = validate_roster(&[create_test_employee("1", "MEAN", 120)]);
        match result {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "grade"),
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_roster_rejects_duplicate_initials() {
        let result = validate_roster(&[
            create_test_employee("1", "MEAN", 100),
            create_test_employee("2", "mean", 100),
        ]);
        match result {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "initials"),
            other => panic!("Expected InvalidEmployee, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_roster_rejects_duplicate_ids() {
        let result = validate_roster(&[
            create_test_employee("1", "MEAN", 100),
            create_test_employee("1", "SCMA", 100),
        ]);
        assert!(matches!(result, Err(EngineError::InvalidEmployee { .. })));
    }
}
