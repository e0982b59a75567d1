//! License qualification against a target aircraft.

use crate::config::CompatibilityTable;
use crate::models::{AirframeType, Employee, License, SkillEntry, TaskRole};

/// Returns the first skill entry whose airframe can service the target.
///
/// Only the first matching entry counts; a later entry for a related type
/// does not upgrade the employee.
pub fn qualifying_skill<'a>(
    employee: &'a Employee,
    target: AirframeType,
    compatibility: &CompatibilityTable,
) -> Option<&'a SkillEntry> {
    employee
        .skills
        .iter()
        .find(|skill| compatibility.can_service(skill.aircraft_type, target))
}

/// Returns the license an employee holds for the target airframe.
pub fn license_for(
    employee: &Employee,
    target: AirframeType,
    compatibility: &CompatibilityTable,
) -> Option<License> {
    qualifying_skill(employee, target, compatibility).and_then(|skill| skill.license)
}

/// Whether an employee may fill a role on an aircraft of the target type.
///
/// Managers and supervisors never qualify. The helper role has no license
/// prerequisite.
pub fn can_fill(
    employee: &Employee,
    target: AirframeType,
    role: TaskRole,
    compatibility: &CompatibilityTable,
) -> bool {
    if employee.role.is_management() {
        return false;
    }
    match role {
        TaskRole::CatAHelper => true,
        TaskRole::B1 => license_for(employee, target, compatibility).is_some_and(License::covers_b1),
        TaskRole::B2 => license_for(employee, target, compatibility).is_some_and(License::covers_b2),
    }
}

/// Whether the employee holds the combined B1/2 license for the target type.
pub fn holds_combined(
    employee: &Employee,
    target: AirframeType,
    compatibility: &CompatibilityTable,
) -> bool {
    license_for(employee, target, compatibility) == Some(License::B1B2)
}
