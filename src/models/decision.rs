//! Off-day eligibility requests and decisions.
//!
//! A decision never collapses to a bare boolean: each day keeps the full
//! trail of [`Reason`]s that explains why leave can or cannot be granted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DayCoverage, ShiftCode};

/// Outcome of a single rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    /// The rule is satisfied.
    Pass,
    /// The rule is violated; the day cannot be granted.
    Fail,
    /// Advisory only; never blocks.
    Info,
}

/// One entry of the eligibility trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    /// Whether the rule passed, failed or is advisory.
    pub kind: ReasonKind,
    /// Stable identifier of the rule (e.g. `"supervisor_floor"`).
    pub rule_id: String,
    /// Human-readable explanation for the operator.
    pub text: String,
}

impl Reason {
    /// Creates a passing reason.
    pub fn pass(rule_id: &str, text: impl Into<String>) -> Self {
        Self::new(ReasonKind::Pass, rule_id, text)
    }

    /// Creates a failing reason.
    pub fn fail(rule_id: &str, text: impl Into<String>) -> Self {
        Self::new(ReasonKind::Fail, rule_id, text)
    }

    /// Creates an advisory reason.
    pub fn info(rule_id: &str, text: impl Into<String>) -> Self {
        Self::new(ReasonKind::Info, rule_id, text)
    }

    fn new(kind: ReasonKind, rule_id: &str, text: impl Into<String>) -> Self {
        Self {
            kind,
            rule_id: rule_id.to_string(),
            text: text.into(),
        }
    }

    /// Returns true if this reason blocks the grant.
    pub fn is_blocking(&self) -> bool {
        self.kind == ReasonKind::Fail
    }
}

/// Zone of the daily-target headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetZone {
    /// Below the blocking threshold; no off-days.
    Red,
    /// Warning band; off-days allowed.
    Orange,
    /// Comfortably staffed.
    Green,
}

/// A request to simulate leave for one employee (or none) over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffDayRequest {
    /// The employee asking for leave; `None` runs the day-level check.
    #[serde(default)]
    pub candidate_id: Option<String>,
    /// First day of the window.
    pub start_date: NaiveDate,
    /// Number of consecutive days, at least 1.
    pub day_count: u32,
    /// Leave code to simulate (e.g. `"V"`).
    pub leave_code: ShiftCode,
}

/// Day figures after the candidate's leave would take effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Manhours after swapping the candidate's shift for the leave code.
    pub manhours: Decimal,
    /// Seniors on duty.
    pub seniors_on_duty: u32,
    /// Supervisors on duty.
    pub supervisors_on_duty: u32,
    /// B1-capable staff on duty.
    pub b1_on_duty: u32,
    /// B2-capable staff on duty.
    pub b2_on_duty: u32,
    /// Cat-A staff on duty.
    pub cat_a_on_duty: u32,
    /// Daily-target headcount.
    pub daily_target_count: u32,
}

/// The eligibility verdict for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDecision {
    /// The day evaluated.
    pub date: NaiveDate,
    /// True when no reason blocks.
    pub grantable: bool,
    /// Every rule evaluated for the day, in evaluation order.
    pub reasons: Vec<Reason>,
    /// The coverage figures the rules were evaluated against.
    pub coverage: DayCoverage,
    /// Figures after the leave; absent for the day-level check.
    pub projection: Option<Projection>,
}

impl DayDecision {
    /// Reasons produced by a rule.
    pub fn reasons_for<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Reason> {
        self.reasons.iter().filter(move |r| r.rule_id == rule_id)
    }
}

/// How many seniors and supervisors could still take leave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headroom {
    /// Seniors on duty above the senior floor.
    pub seniors: u32,
    /// Supervisors on duty above the supervisor floor.
    pub supervisors: u32,
}

/// The eligibility verdict for a whole window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    /// The employee evaluated, if any.
    pub candidate_id: Option<String>,
    /// The simulated leave code.
    pub leave_code: ShiftCode,
    /// True only when every day is grantable.
    pub grantable: bool,
    /// Per-day verdicts in date order.
    pub days: Vec<DayDecision>,
    /// Position headroom on the first day of the window.
    pub headroom: Headroom,
}

impl EligibilityDecision {
    /// Dates on which the leave can be granted.
    pub fn grantable_dates(&self) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter(|d| d.grantable)
            .map(|d| d.date)
            .collect()
    }
}
