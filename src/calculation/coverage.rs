//! Manhour and coverage calculations.
//!
//! Every aggregate works on the day's effective assignments: one record per
//! employee (the last one wins), joined with the roster. Assignments for
//! employees missing from the roster never contribute.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::{CompatibilityTable, RosterConfig, ShiftCatalog};
use crate::models::{
    AirframeType, DayCoverage, Employee, License, LicenseCounts, Role, ScheduleSnapshot,
    ShiftAssignment, effective_assignments,
};

use super::compatibility::license_for;
use super::duty::{contribution, day_shifts, roster_index};

/// Total grade-weighted manhours worked on a date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roster_engine::calculation::manhours;
/// use roster_engine::config::ShiftCatalog;
/// use roster_engine::models::{Employee, Role, ShiftAssignment};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let employee = Employee {
///     id: "1".to_string(),
///     name: "Meier, Anna".to_string(),
///     initials: "MEAN".to_string(),
///     department: String::new(),
///     role: Role::Engineer,
///     grade: 80,
///     skills: vec![],
///     certifications: vec![],
///     special_skills: Default::default(),
/// };
/// let assignments = vec![ShiftAssignment::new(date, "1", "e")];
///
/// let total = manhours(&[employee], &assignments, date, &ShiftCatalog::standard());
/// assert_eq!(total, Decimal::from(8));
/// ```
pub fn manhours(
    employees: &[Employee],
    assignments: &[ShiftAssignment],
    date: NaiveDate,
    catalog: &ShiftCatalog,
) -> Decimal {
    let roster = roster_index(employees);
    effective_assignments(assignments, date)
        .into_values()
        .filter(|a| catalog.is_on_duty(&a.shift_code))
        .filter_map(|a| {
            roster
                .get(a.employee_id.as_str())
                .map(|employee| contribution(employee, &a.shift_code, catalog))
        })
        .sum()
}

/// Sums [`manhours`] over the given dates.
pub fn weekly_manhours(
    employees: &[Employee],
    assignments: &[ShiftAssignment],
    dates: &[NaiveDate],
    catalog: &ShiftCatalog,
) -> Decimal {
    dates
        .iter()
        .map(|date| manhours(employees, assignments, *date, catalog))
        .sum()
}

/// The Monday-to-Sunday week containing a date.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

/// Tallies on-duty license holders able to work on an airframe.
///
/// Each employee is classified by the first skill entry that can service
/// the airframe; entries without a B-license are not counted.
pub fn license_counts(
    employees: &[Employee],
    assignments: &[ShiftAssignment],
    date: NaiveDate,
    airframe: AirframeType,
    catalog: &ShiftCatalog,
    compatibility: &CompatibilityTable,
) -> LicenseCounts {
    let mut counts = LicenseCounts::default();
    for shift in day_shifts(employees, assignments, date) {
        if !catalog.is_on_duty(shift.shift_code) {
            continue;
        }
        match license_for(shift.employee, airframe, compatibility) {
            Some(License::B1) => counts.b1 += 1,
            Some(License::B2) => counts.b2 += 1,
            Some(License::B1B2) => counts.combined += 1,
            _ => {}
        }
    }
    counts
}

/// Minimum on-duty headcount of a license category.
///
/// `ceil(total * floor / capacity)`; when capacity is zero the ratio is 1
/// and the whole category is required.
pub fn category_minimum(total_in_category: u32, floor: Decimal, capacity: Decimal) -> u32 {
    if capacity <= Decimal::ZERO {
        return total_in_category;
    }
    (Decimal::from(total_in_category) * floor / capacity)
        .ceil()
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Manhours the roster would yield if every non-management employee worked
/// one nominal shift.
pub fn theoretical_capacity(employees: &[Employee], nominal_shift_hours: Decimal) -> Decimal {
    employees
        .iter()
        .filter(|e| !e.role.is_management())
        .map(|e| nominal_shift_hours * Decimal::from(e.grade) / Decimal::ONE_HUNDRED)
        .sum()
}

/// Builds the full coverage picture of a day.
pub fn analyze_day(
    snapshot: &ScheduleSnapshot,
    date: NaiveDate,
    config: &RosterConfig,
) -> DayCoverage {
    let policy = &config.policy;
    let catalog = &config.shifts;
    let employees = &snapshot.employees;

    let shifts = day_shifts(employees, &snapshot.assignments, date);
    let on_duty: Vec<&Employee> = shifts
        .iter()
        .filter(|s| catalog.is_on_duty(s.shift_code))
        .map(|s| s.employee)
        .collect();

    let count_on_duty = |pred: &dyn Fn(&Employee) -> bool| -> u32 {
        on_duty.iter().filter(|e| pred(e)).count() as u32
    };
    let count_roster = |pred: &dyn Fn(&Employee) -> bool| -> u32 {
        employees.iter().filter(|e| pred(e)).count() as u32
    };

    let covers_b1 = |e: &Employee| e.primary_license().is_some_and(License::covers_b1);
    let covers_b2 = |e: &Employee| e.primary_license().is_some_and(License::covers_b2);
    let is_cat_a = |e: &Employee| e.primary_license() == Some(License::CatA);

    let total_b1 = count_roster(&covers_b1);
    let total_b2 = count_roster(&covers_b2);
    let total_cat_a = count_roster(&is_cat_a);

    let capacity = theoretical_capacity(employees, policy.nominal_shift_hours);
    let baseline = policy.min_manhours;

    let cadence_codes = policy.daily_target.cadence_codes(date).to_vec();
    let daily_target_count = shifts
        .iter()
        .filter(|s| !s.employee.role.is_management() && cadence_codes.contains(s.shift_code))
        .count() as u32;

    let on_duty_count = on_duty.len() as u32;

    DayCoverage {
        date,
        current_manhours: manhours(employees, &snapshot.assignments, date, catalog),
        manhour_floor: snapshot.floor_for(date, baseline),
        on_duty_count,
        off_duty_count: (employees.len() as u32).saturating_sub(on_duty_count),
        seniors_on_duty: count_on_duty(&|e| e.role == Role::SeniorEngineer),
        supervisors_on_duty: count_on_duty(&|e| e.role == Role::Supervisor),
        b1_on_duty: count_on_duty(&covers_b1),
        b2_on_duty: count_on_duty(&covers_b2),
        cat_a_on_duty: count_on_duty(&is_cat_a),
        total_b1,
        total_b2,
        total_cat_a,
        theoretical_capacity: capacity,
        min_b1_required: category_minimum(total_b1, baseline, capacity),
        min_b2_required: category_minimum(total_b2, baseline, capacity),
        min_cat_a_required: category_minimum(total_cat_a, baseline, capacity),
        is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        iso_week: date.iso_week().week(),
        cadence_codes,
        daily_target_count,
        daily_target_zone: policy.daily_target.zone(daily_target_count),
    }
}
