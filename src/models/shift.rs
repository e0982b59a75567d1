//! Shift codes and daily shift assignments.
//!
//! A [`ShiftAssignment`] binds one employee to one shift code on one day.
//! What a code means (hours, duty or off) is resolved through the
//! shift catalog in [`crate::config`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An opaque shift code such as `"Ea"`, `"La"` or `"V"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftCode(String);

impl ShiftCode {
    /// Creates a shift code from its abbreviation.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the abbreviation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShiftCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Whether a shift code represents worked time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftCategory {
    /// Worked time; counts toward manhours and coverage.
    Duty,
    /// Leave, absence or a rest day.
    Off,
}

/// One employee's shift on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The calendar day.
    pub date: NaiveDate,
    /// The employee the shift belongs to.
    pub employee_id: String,
    /// The assigned shift code.
    pub shift_code: ShiftCode,
}

impl ShiftAssignment {
    /// Creates an assignment.
    pub fn new(date: NaiveDate, employee_id: impl Into<String>, shift_code: impl Into<ShiftCode>) -> Self {
        Self {
            date,
            employee_id: employee_id.into(),
            shift_code: shift_code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_code_is_transparent_in_json() {
        let assignment = ShiftAssignment::new(
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            "12",
            "Ea",
        );
        let json = serde_json::to_value(&assignment).unwrap();
        assert_eq!(json["shift_code"], "Ea");
        assert_eq!(json["date"], "2026-01-15");
    }

    #[test]
    fn test_deserialize_assignment() {
        let json = r#"{"date": "2026-02-03", "employee_id": "5", "shift_code": "V"}"#;
        let assignment: ShiftAssignment = serde_json::from_str(json).unwrap();
        assert_eq!(assignment.shift_code.as_str(), "V");
        assert_eq!(assignment.employee_id, "5");
    }

    #[test]
    fn test_shift_codes_are_case_sensitive() {
        assert_ne!(ShiftCode::from("e"), ShiftCode::from("E"));
        assert_eq!(ShiftCode::from("La").to_string(), "La");
    }
}
