//! Caller-owned schedule snapshots.
//!
//! Every engine operation takes a [`ScheduleSnapshot`] (or slices of one)
//! explicitly; the engine never keeps roster state between calls.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, ShiftAssignment, ShiftCode};

/// Employees, their shift assignments and per-date manhour floors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    /// The active roster.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Shift assignments across all dates.
    #[serde(default)]
    pub assignments: Vec<ShiftAssignment>,
    /// Per-date overrides of the minimum manhours floor.
    #[serde(default)]
    pub target_overrides: BTreeMap<NaiveDate, Decimal>,
}

impl ScheduleSnapshot {
    /// Creates a snapshot without floor overrides.
    pub fn new(employees: Vec<Employee>, assignments: Vec<ShiftAssignment>) -> Self {
        Self {
            employees,
            assignments,
            target_overrides: BTreeMap::new(),
        }
    }

    /// Finds an employee by id.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Writes a shift for an employee, replacing any earlier shift that day.
    pub fn upsert_assignment(
        &mut self,
        date: NaiveDate,
        employee_id: &str,
        shift_code: impl Into<ShiftCode>,
    ) {
        self.assignments
            .retain(|a| !(a.date == date && a.employee_id == employee_id));
        self.assignments
            .push(ShiftAssignment::new(date, employee_id, shift_code));
    }

    /// Returns the effective assignments for a date, one per employee.
    ///
    /// When an employee has several records for the date, the last one in
    /// list order wins. The result is ordered by employee id.
    pub fn day_assignments(&self, date: NaiveDate) -> Vec<&ShiftAssignment> {
        effective_assignments(&self.assignments, date)
            .into_values()
            .collect()
    }

    /// Returns the shift code an employee holds on a date, if any.
    pub fn shift_of(&self, employee_id: &str, date: NaiveDate) -> Option<&ShiftCode> {
        self.assignments
            .iter()
            .rev()
            .find(|a| a.date == date && a.employee_id == employee_id)
            .map(|a| &a.shift_code)
    }

    /// Returns the manhour floor for a date: its override, else the baseline.
    pub fn floor_for(&self, date: NaiveDate, baseline: Decimal) -> Decimal {
        self.target_overrides
            .get(&date)
            .copied()
            .unwrap_or(baseline)
    }
}

/// Deduplicates a date's assignments by employee, keeping the last record.
pub(crate) fn effective_assignments(
    assignments: &[ShiftAssignment],
    date: NaiveDate,
) -> BTreeMap<&str, &ShiftAssignment> {
    let mut by_employee = BTreeMap::new();
    for assignment in assignments.iter().filter(|a| a.date == date) {
        by_employee.insert(assignment.employee_id.as_str(), assignment);
    }
    by_employee
}
