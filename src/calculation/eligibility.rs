//! Off-day eligibility checking.
//!
//! For each day of the requested window the checker projects the day's
//! figures as if the candidate held the leave code instead of their current
//! shift, then evaluates every staffing rule against the projection. Days
//! are evaluated independently; the window is grantable only when every
//! day is.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RosterConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DayCoverage, DayDecision, EligibilityDecision, Employee, Headroom, License, OffDayRequest,
    Projection, Reason, Role, ScheduleSnapshot, ShiftCode, TargetZone,
};

use super::coverage::analyze_day;
use super::duty::contribution;

/// Longest off-day window a single request may cover.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Rule id: the day falls on a weekend.
pub const RULE_WEEKEND: &str = "weekend";
/// Rule id: minimum manhours for the day.
pub const RULE_MANHOURS: &str = "manhours_floor";
/// Rule id: minimum seniors on duty.
pub const RULE_SENIORS: &str = "senior_floor";
/// Rule id: minimum supervisors on duty.
pub const RULE_SUPERVISORS: &str = "supervisor_floor";
/// Rule id: daily-target headcount.
pub const RULE_DAILY_TARGET: &str = "daily_target";
/// Rule id: B1 category coverage.
pub const RULE_B1: &str = "b1_coverage";
/// Rule id: B2 category coverage.
pub const RULE_B2: &str = "b2_coverage";
/// Rule id: Cat-A category coverage (advisory).
pub const RULE_CAT_A: &str = "cat_a_coverage";
/// Rule id: license summary of the day-level check.
pub const RULE_LICENSE_SUMMARY: &str = "license_summary";

/// Decides whether leave can be granted over a window of days.
///
/// With no candidate the day-level check runs instead: current manhours,
/// seniors and supervisors against their floors, plus the daily-target zone.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRequest`] for an empty window and
/// [`EngineError::EmployeeNotFound`] for an unknown candidate. A breached
/// floor is not an error; it yields a non-grantable decision.
pub fn check_off_day_eligibility(
    snapshot: &ScheduleSnapshot,
    request: &OffDayRequest,
    config: &RosterConfig,
) -> EngineResult<EligibilityDecision> {
    if request.day_count == 0 {
        return Err(EngineError::InvalidRequest {
            message: "day_count must be at least 1".to_string(),
        });
    }
    if request.day_count > MAX_WINDOW_DAYS {
        return Err(EngineError::InvalidRequest {
            message: format!("day_count must be at most {}", MAX_WINDOW_DAYS),
        });
    }
    let dates = (0..request.day_count)
        .map(|offset| {
            request
                .start_date
                .checked_add_days(Days::new(u64::from(offset)))
                .ok_or_else(|| EngineError::InvalidRequest {
                    message: format!(
                        "window of {} days from {} runs past the last supported date",
                        request.day_count, request.start_date
                    ),
                })
        })
        .collect::<EngineResult<Vec<NaiveDate>>>()?;

    let candidate = match &request.candidate_id {
        Some(id) => Some(
            snapshot
                .employee(id)
                .ok_or_else(|| EngineError::EmployeeNotFound { id: id.clone() })?,
        ),
        None => None,
    };

    let days: Vec<DayDecision> = dates
        .into_iter()
        .map(|date| {
            let coverage = analyze_day(snapshot, date, config);
            match candidate {
                Some(employee) => {
                    let current = snapshot.shift_of(&employee.id, date);
                    evaluate_candidate(employee, current, &request.leave_code, coverage, config)
                }
                None => evaluate_day(coverage, config),
            }
        })
        .collect();

    let grantable = days.iter().all(|d| d.grantable);
    let headroom = days
        .first()
        .map(|d| Headroom {
            seniors: d
                .coverage
                .seniors_on_duty
                .saturating_sub(config.policy.min_seniors),
            supervisors: d
                .coverage
                .supervisors_on_duty
                .saturating_sub(config.policy.min_supervisors),
        })
        .unwrap_or_default();

    debug!(
        candidate = ?request.candidate_id,
        start = %request.start_date,
        days = request.day_count,
        grantable,
        "Evaluated off-day eligibility"
    );

    Ok(EligibilityDecision {
        candidate_id: request.candidate_id.clone(),
        leave_code: request.leave_code.clone(),
        grantable,
        days,
        headroom,
    })
}

fn evaluate_candidate(
    employee: &Employee,
    current: Option<&ShiftCode>,
    leave_code: &ShiftCode,
    coverage: DayCoverage,
    config: &RosterConfig,
) -> DayDecision {
    let policy = &config.policy;
    let catalog = &config.shifts;
    let mut reasons = Vec::new();

    if coverage.is_weekend {
        reasons.push(Reason::pass(
            RULE_WEEKEND,
            "Weekend - reduced staffing requirements",
        ));
    }

    // Counters drop only when the leave actually takes the candidate off duty.
    let currently_on_duty = current.is_some_and(|code| catalog.is_on_duty(code));
    let removed = u32::from(currently_on_duty && !catalog.is_on_duty(leave_code));

    let current_contribution = match current {
        Some(code) if catalog.is_on_duty(code) => contribution(employee, code, catalog),
        _ => Decimal::ZERO,
    };
    let leave_contribution = if catalog.is_on_duty(leave_code) {
        contribution(employee, leave_code, catalog)
    } else {
        Decimal::ZERO
    };

    let cadence_held = current.is_some_and(|code| coverage.cadence_codes.contains(code))
        && !coverage.cadence_codes.contains(leave_code);
    let affects_target = employee.grade > 0 && !employee.role.is_management();

    // Each counter only loses the candidate when the candidate is part of it.
    let primary = employee.primary_license();
    let removed_if = |member: bool| if member { removed } else { 0 };

    let projection = Projection {
        manhours: coverage.current_manhours - current_contribution + leave_contribution,
        seniors_on_duty: coverage
            .seniors_on_duty
            .saturating_sub(removed_if(employee.role == Role::SeniorEngineer)),
        supervisors_on_duty: coverage
            .supervisors_on_duty
            .saturating_sub(removed_if(employee.role == Role::Supervisor)),
        b1_on_duty: coverage
            .b1_on_duty
            .saturating_sub(removed_if(primary.is_some_and(License::covers_b1))),
        b2_on_duty: coverage
            .b2_on_duty
            .saturating_sub(removed_if(primary.is_some_and(License::covers_b2))),
        cat_a_on_duty: coverage
            .cat_a_on_duty
            .saturating_sub(removed_if(primary == Some(License::CatA))),
        daily_target_count: coverage
            .daily_target_count
            .saturating_sub(u32::from(cadence_held && affects_target)),
    };

    if employee.role == Role::Supervisor {
        reasons.push(floor_reason(
            RULE_SUPERVISORS,
            "Supervisor",
            projection.supervisors_on_duty,
            policy.min_supervisors,
        ));
    }
    if employee.role == Role::SeniorEngineer {
        reasons.push(floor_reason(
            RULE_SENIORS,
            "Senior",
            projection.seniors_on_duty,
            policy.min_seniors,
        ));
    }

    if employee.grade == 0 {
        reasons.push(Reason::pass(
            RULE_MANHOURS,
            format!("{} has 0% grade - no manhours impact", employee.initials),
        ));
    } else if projection.manhours >= coverage.manhour_floor {
        reasons.push(Reason::pass(
            RULE_MANHOURS,
            format!(
                "Manhours OK: {:.1}h after granting (min {}h)",
                projection.manhours, coverage.manhour_floor
            ),
        ));
    } else {
        reasons.push(Reason::fail(
            RULE_MANHOURS,
            format!(
                "Manhours insufficient: {:.1}h after granting (need {}h)",
                projection.manhours, coverage.manhour_floor
            ),
        ));
    }

    if affects_target {
        if cadence_held {
            let count = projection.daily_target_count;
            reasons.push(match policy.daily_target.zone(count) {
                TargetZone::Red => Reason::fail(
                    RULE_DAILY_TARGET,
                    format!(
                        "Daily target would drop to {} (min {} required)",
                        count, policy.daily_target.red_below
                    ),
                ),
                TargetZone::Orange => Reason::info(
                    RULE_DAILY_TARGET,
                    format!(
                        "Daily target will drop to {} (orange zone, {}+ preferred)",
                        count, policy.daily_target.green_from
                    ),
                ),
                TargetZone::Green => Reason::pass(
                    RULE_DAILY_TARGET,
                    format!(
                        "Daily target OK: {} after granting (>= {})",
                        count, policy.daily_target.green_from
                    ),
                ),
            });
        } else {
            reasons.push(Reason::pass(
                RULE_DAILY_TARGET,
                format!(
                    "Not on {} shift - no daily target impact",
                    coverage.cadence_label()
                ),
            ));
        }
    }

    if primary.is_some_and(License::covers_b1) {
        reasons.push(category_reason(
            RULE_B1,
            "B1",
            projection.b1_on_duty,
            coverage.min_b1_required,
        ));
    }
    if primary.is_some_and(License::covers_b2) {
        reasons.push(category_reason(
            RULE_B2,
            "B2",
            projection.b2_on_duty,
            coverage.min_b2_required,
        ));
    }
    if primary == Some(License::CatA) {
        let after = projection.cat_a_on_duty;
        let min = coverage.min_cat_a_required;
        reasons.push(if after >= min {
            Reason::pass(
                RULE_CAT_A,
                format!("Cat A coverage OK: {} on duty after granting (min {})", after, min),
            )
        } else {
            Reason::info(
                RULE_CAT_A,
                format!("Cat A at {} after granting (min {})", after, min),
            )
        });
    }

    let grantable = !reasons.iter().any(Reason::is_blocking);
    debug!(
        employee = %employee.id,
        date = %coverage.date,
        grantable,
        "Evaluated candidate day"
    );

    DayDecision {
        date: coverage.date,
        grantable,
        reasons,
        coverage,
        projection: Some(projection),
    }
}

fn evaluate_day(coverage: DayCoverage, config: &RosterConfig) -> DayDecision {
    let policy = &config.policy;
    let mut reasons = Vec::new();

    if coverage.is_weekend {
        reasons.push(Reason::pass(
            RULE_WEEKEND,
            "Weekend - reduced staffing requirements",
        ));
    }

    if coverage.current_manhours >= coverage.manhour_floor {
        reasons.push(Reason::pass(
            RULE_MANHOURS,
            format!(
                "Current manhours: {:.1}h (min {}h)",
                coverage.current_manhours, coverage.manhour_floor
            ),
        ));
    } else {
        reasons.push(Reason::fail(
            RULE_MANHOURS,
            format!(
                "Current manhours: {:.1}h (need {}h)",
                coverage.current_manhours, coverage.manhour_floor
            ),
        ));
    }

    reasons.push(floor_reason(
        RULE_SENIORS,
        "Senior",
        coverage.seniors_on_duty,
        policy.min_seniors,
    ));
    reasons.push(floor_reason(
        RULE_SUPERVISORS,
        "Supervisor",
        coverage.supervisors_on_duty,
        policy.min_supervisors,
    ));

    reasons.push(Reason::info(
        RULE_LICENSE_SUMMARY,
        format!(
            "B1: {}/{} min | B2: {}/{} min | Cat A: {}/{} min",
            coverage.b1_on_duty,
            coverage.min_b1_required,
            coverage.b2_on_duty,
            coverage.min_b2_required,
            coverage.cat_a_on_duty,
            coverage.min_cat_a_required
        ),
    ));

    let label = coverage.cadence_label();
    let count = coverage.daily_target_count;
    reasons.push(match coverage.daily_target_zone {
        TargetZone::Red => Reason::fail(
            RULE_DAILY_TARGET,
            format!(
                "Daily target: {} ({} week) - red zone, no off-days should be granted",
                count, label
            ),
        ),
        TargetZone::Orange => Reason::info(
            RULE_DAILY_TARGET,
            format!("Daily target: {} ({} week) - orange zone", count, label),
        ),
        TargetZone::Green => Reason::pass(
            RULE_DAILY_TARGET,
            format!("Daily target: {} ({} week) - green zone", count, label),
        ),
    });

    let grantable = !reasons.iter().any(Reason::is_blocking);
    DayDecision {
        date: coverage.date,
        grantable,
        reasons,
        coverage,
        projection: None,
    }
}

fn floor_reason(rule_id: &str, label: &str, after: u32, min: u32) -> Reason {
    if after >= min {
        Reason::pass(
            rule_id,
            format!("{} coverage OK: {} on duty (min {})", label, after, min),
        )
    } else {
        Reason::fail(
            rule_id,
            format!("{} coverage insufficient: {} on duty (need {})", label, after, min),
        )
    }
}

fn category_reason(rule_id: &str, label: &str, after: u32, min: u32) -> Reason {
    if after >= min {
        Reason::pass(
            rule_id,
            format!("{} coverage OK: {} on duty after granting (min {})", label, after, min),
        )
    } else {
        Reason::fail(
            rule_id,
            format!("{} coverage low: {} after granting (min {})", label, after, min),
        )
    }
}

/// Writes the leave code into the snapshot for every grantable day.
///
/// Returns the dates written. Non-grantable days are left untouched.
///
/// # Errors
///
/// Returns [`EngineError::EmployeeNotFound`] when the employee is not on the
/// roster and [`EngineError::InvalidRequest`] when the decision was made for
/// a different employee.
pub fn apply_off_days(
    snapshot: &mut ScheduleSnapshot,
    decision: &EligibilityDecision,
    employee_id: &str,
    leave_code: &ShiftCode,
) -> EngineResult<Vec<NaiveDate>> {
    if snapshot.employee(employee_id).is_none() {
        return Err(EngineError::EmployeeNotFound {
            id: employee_id.to_string(),
        });
    }
    if let Some(candidate) = &decision.candidate_id
        && candidate != employee_id
    {
        return Err(EngineError::InvalidRequest {
            message: format!(
                "decision was made for employee {}, not {}",
                candidate, employee_id
            ),
        });
    }

    let dates = decision.grantable_dates();
    for date in &dates {
        snapshot.upsert_assignment(*date, employee_id, leave_code.clone());
    }
    debug!(employee = %employee_id, applied = dates.len(), "Applied off days");
    Ok(dates)
}
