//! Core data models for the Roster Engine.
//!
//! This module contains the roster, fleet and work-requirement models
//! together with the decision and result types the engine produces.

mod aircraft;
mod allocation_result;
mod audit_issue;
mod coverage;
mod decision;
mod employee;
mod requirement;
mod shift;
mod snapshot;
mod task;

pub use aircraft::{Aircraft, AirframeType};
pub use allocation_result::{AllocationResult, Shortfall, SlotCandidates};
pub use audit_issue::{AuditIssue, IssueKind, Severity};
pub use coverage::{DayCoverage, LicenseCounts};
pub use decision::{
    DayDecision, EligibilityDecision, Headroom, OffDayRequest, Projection, Reason, ReasonKind,
    TargetZone,
};
pub use employee::{Employee, License, Role, SkillEntry, SpecialSkill};
pub use requirement::{HOURS_PER_PERSON, Priority, WorkRequirement, persons_from_hours};
pub use shift::{ShiftAssignment, ShiftCategory, ShiftCode};
pub use snapshot::ScheduleSnapshot;
pub(crate) use snapshot::effective_assignments;
pub use task::{TaskAssignment, TaskRole};
