//! Raw shift-assignment rows from roster sheets.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, ShiftAssignment};

/// One untyped row: who, when, which code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    /// Employee initials as written on the sheet.
    pub initials: String,
    /// Date text, `YYYY-MM-DD` or `DD.MM.YYYY`.
    pub date: String,
    /// Shift code text.
    pub code: String,
}

impl AssignmentRow {
    /// Creates a row from its three cells.
    pub fn new(initials: &str, date: &str, code: &str) -> Self {
        Self {
            initials: initials.to_string(),
            date: date.to_string(),
            code: code.to_string(),
        }
    }
}

/// Parses a sheet date in ISO (`2026-01-15`) or Swiss (`15.01.2026`) form.
pub fn parse_sheet_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d.%m.%Y"))
        .ok()
}

/// Converts raw rows into typed assignments.
///
/// Initials are matched against the roster ignoring case. The batch is
/// all-or-nothing: the first bad row rejects everything.
///
/// # Errors
///
/// Returns [`EngineError::InvalidImportRow`] with the 1-based row number for
/// unknown initials, unparseable dates or empty codes.
pub fn parse_assignment_rows(
    rows: &[AssignmentRow],
    employees: &[Employee],
) -> EngineResult<Vec<ShiftAssignment>> {
    let mut by_initials: HashMap<String, &Employee> = HashMap::with_capacity(employees.len());
    for employee in employees {
        by_initials
            .entry(employee.initials.trim().to_ascii_uppercase())
            .or_insert(employee);
    }

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row_number = index + 1;
            let initials = row.initials.trim().to_ascii_uppercase();
            let employee = by_initials.get(&initials).ok_or_else(|| EngineError::InvalidImportRow {
                row: row_number,
                message: format!("unknown initials '{}'", row.initials.trim()),
            })?;
            let date = parse_sheet_date(&row.date).ok_or_else(|| EngineError::InvalidImportRow {
                row: row_number,
                message: format!(
                    "cannot parse date '{}', expected YYYY-MM-DD or DD.MM.YYYY",
                    row.date
                ),
            })?;
            let code = row.code.trim();
            if code.is_empty() {
                return Err(EngineError::InvalidImportRow {
                    row: row_number,
                    message: "empty shift code".to_string(),
                });
            }
            Ok(ShiftAssignment::new(date, employee.id.as_str(), code))
        })
        .collect()
}
