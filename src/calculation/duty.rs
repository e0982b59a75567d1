//! Duty resolution for a single day.
//!
//! Joins a day's effective shift assignments with the roster. Assignments
//! referencing employees missing from the roster are dropped here, so every
//! aggregate built on top of this module excludes them silently.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::ShiftCatalog;
use crate::models::{Employee, ShiftAssignment, ShiftCode, effective_assignments};

/// An employee together with the shift they hold on the day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayShift<'a> {
    /// The roster employee.
    pub employee: &'a Employee,
    /// The effective shift code for the day.
    pub shift_code: &'a ShiftCode,
}

/// Indexes the roster by employee id; the first entry wins on duplicate ids.
pub(crate) fn roster_index(employees: &[Employee]) -> HashMap<&str, &Employee> {
    let mut index = HashMap::with_capacity(employees.len());
    for employee in employees {
        index.entry(employee.id.as_str()).or_insert(employee);
    }
    index
}

/// Grade-weighted hours an employee contributes under a shift code.
///
/// # Examples
///
/// ```
/// use roster_engine::calculation::contribution;
/// use roster_engine::config::ShiftCatalog;
/// use roster_engine::models::{Employee, Role, ShiftCode};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "7".to_string(),
///     name: "Part Timer".to_string(),
///     initials: "PATI".to_string(),
///     department: String::new(),
///     role: Role::Engineer,
///     grade: 50,
///     skills: vec![],
///     certifications: vec![],
///     special_skills: Default::default(),
/// };
/// let catalog = ShiftCatalog::standard();
/// assert_eq!(contribution(&employee, &ShiftCode::from("Ea"), &catalog), Decimal::from(4));
/// ```
pub fn contribution(employee: &Employee, code: &ShiftCode, catalog: &ShiftCatalog) -> Decimal {
    catalog.hours_of(code) * Decimal::from(employee.grade) / Decimal::ONE_HUNDRED
}

/// Resolves every roster employee's effective shift on a date.
///
/// Employees without an assignment are absent from the result. The result
/// follows roster order.
pub fn day_shifts<'a>(
    employees: &'a [Employee],
    assignments: &'a [ShiftAssignment],
    date: NaiveDate,
) -> Vec<DayShift<'a>> {
    let effective = effective_assignments(assignments, date);
    let mut seen = HashSet::new();
    employees
        .iter()
        .filter(|e| seen.insert(e.id.as_str()))
        .filter_map(|employee| {
            effective
                .get(employee.id.as_str())
                .map(|assignment| DayShift {
                    employee,
                    shift_code: &assignment.shift_code,
                })
        })
        .collect()
}

/// Roster employees on duty on a date, in roster order.
pub fn on_duty_employees<'a>(
    employees: &'a [Employee],
    assignments: &'a [ShiftAssignment],
    date: NaiveDate,
    catalog: &ShiftCatalog,
) -> Vec<&'a Employee> {
    day_shifts(employees, assignments, date)
        .into_iter()
        .filter(|shift| catalog.is_on_duty(shift.shift_code))
        .map(|shift| shift.employee)
        .collect()
}
