//! Schedule audit.
//!
//! Surfaces the data-integrity anomalies the aggregates silently resolve
//! (duplicate records, unknown employees) together with fatigue streaks.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::config::RosterConfig;
use crate::models::{AuditIssue, IssueKind, ScheduleSnapshot, Severity, ShiftCode};

/// Audits every assignment of the snapshot.
///
/// Findings are grouped per roster employee in roster order and sorted by
/// date, followed by assignments for employees missing from the roster.
pub fn audit_schedule(snapshot: &ScheduleSnapshot, config: &RosterConfig) -> Vec<AuditIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for employee in &snapshot.employees {
        if !seen.insert(employee.id.as_str()) {
            continue;
        }

        let mut days: BTreeMap<NaiveDate, Vec<&ShiftCode>> = BTreeMap::new();
        for assignment in snapshot
            .assignments
            .iter()
            .filter(|a| a.employee_id == employee.id)
        {
            days.entry(assignment.date)
                .or_default()
                .push(&assignment.shift_code);
        }

        for (date, codes) in &days {
            for _ in 1..codes.len() {
                issues.push(AuditIssue {
                    kind: IssueKind::Duplicate,
                    severity: Severity::High,
                    employee_id: employee.id.clone(),
                    date: *date,
                    message: format!("Duplicate assignment on {}", date),
                });
            }
        }

        let mut streak = 0u32;
        let mut previous: Option<NaiveDate> = None;
        let mut streak_end: Option<NaiveDate> = None;
        for (date, codes) in &days {
            // last record of the day wins
            let on_duty = codes
                .last()
                .is_some_and(|code| config.shifts.is_on_duty(code));
            let continues = previous.and_then(|p| p.succ_opt()) == Some(*date);

            if on_duty && continues && streak > 0 {
                streak += 1;
            } else {
                flush_streak(&mut issues, &employee.id, streak, streak_end, config);
                streak = u32::from(on_duty);
            }
            streak_end = on_duty.then_some(*date);
            previous = Some(*date);
        }
        flush_streak(&mut issues, &employee.id, streak, streak_end, config);
    }

    let mut unknown: Vec<(&str, NaiveDate)> = snapshot
        .assignments
        .iter()
        .filter(|a| snapshot.employee(&a.employee_id).is_none())
        .map(|a| (a.employee_id.as_str(), a.date))
        .collect();
    unknown.sort();
    for (employee_id, date) in unknown {
        issues.push(AuditIssue {
            kind: IssueKind::UnknownEmployee,
            severity: Severity::Low,
            employee_id: employee_id.to_string(),
            date,
            message: format!("Assignment on {} references unknown employee {}", date, employee_id),
        });
    }

    issues
}

fn flush_streak(
    issues: &mut Vec<AuditIssue>,
    employee_id: &str,
    streak: u32,
    end: Option<NaiveDate>,
    config: &RosterConfig,
) {
    let threshold = config.policy.fatigue_streak_days;
    if let Some(date) = end
        && streak >= threshold
        && streak > 0
    {
        issues.push(AuditIssue {
            kind: IssueKind::Fatigue,
            severity: Severity::Medium,
            employee_id: employee_id.to_string(),
            date,
            message: format!("{} consecutive work days ending {}", streak, date),
        });
    }
}
