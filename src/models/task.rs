//! Task assignments binding employees to aircraft roles.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The role an employee fills on an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskRole {
    /// B1 certifying technician.
    B1,
    /// B2 certifying technician.
    B2,
    /// Cat-A mechanic or helper; no license prerequisite.
    #[serde(rename = "cat_a_helper", alias = "Cat A/Helper")]
    CatAHelper,
}

impl fmt::Display for TaskRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskRole::B1 => f.write_str("B1"),
            TaskRole::B2 => f.write_str("B2"),
            TaskRole::CatAHelper => f.write_str("Cat A/Helper"),
        }
    }
}

/// A role binding of one employee to one aircraft on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The day of the work.
    pub date: NaiveDate,
    /// The aircraft being worked on.
    pub aircraft_id: String,
    /// The assigned employee.
    pub employee_id: String,
    /// The role filled.
    pub role: TaskRole,
    /// Pinned by an operator; never displaced by the allocator.
    #[serde(default)]
    pub is_manual_override: bool,
}

impl TaskAssignment {
    /// Creates an allocator-produced assignment.
    pub fn automatic(date: NaiveDate, aircraft_id: &str, employee_id: &str, role: TaskRole) -> Self {
        Self {
            id: format!("assign-{}-{}-{}-{}", employee_id, aircraft_id, date, role_slug(role)),
            date,
            aircraft_id: aircraft_id.to_string(),
            employee_id: employee_id.to_string(),
            role,
            is_manual_override: false,
        }
    }

    /// Creates an operator-pinned assignment.
    pub fn manual(date: NaiveDate, aircraft_id: &str, employee_id: &str, role: TaskRole) -> Self {
        Self {
            id: format!(
                "assign-{}-{}-{}-{}-manual",
                employee_id,
                aircraft_id,
                date,
                role_slug(role)
            ),
            date,
            aircraft_id: aircraft_id.to_string(),
            employee_id: employee_id.to_string(),
            role,
            is_manual_override: true,
        }
    }
}

fn role_slug(role: TaskRole) -> &'static str {
    match role {
        TaskRole::B1 => "B1",
        TaskRole::B2 => "B2",
        TaskRole::CatAHelper => "CatA",
    }
}
