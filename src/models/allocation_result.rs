//! Allocator output types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{TaskAssignment, TaskRole};

/// A role on one aircraft that could not be fully staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// The requirement that is short.
    pub requirement_id: String,
    /// The aircraft of the requirement.
    pub aircraft_id: String,
    /// The role that is short.
    pub role: TaskRole,
    /// Headcount asked for.
    pub required: u32,
    /// Headcount placed (manual and automatic).
    pub filled: u32,
}

impl Shortfall {
    /// Slots left open.
    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.filled)
    }
}

/// The outcome of one allocator run.
///
/// The allocator always completes; infeasibility shows up as a non-zero
/// `unfilled_count` and a list of [`Shortfall`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The day allocated.
    pub date: NaiveDate,
    /// Manual overrides, verbatim, followed by new automatic assignments.
    pub assignments: Vec<TaskAssignment>,
    /// Total required slots over all requirements.
    pub total_required: u32,
    /// Required slots left open.
    pub unfilled_count: u32,
    /// Open slots per requirement and role.
    pub shortfalls: Vec<Shortfall>,
}

impl AllocationResult {
    /// Assignments made by the allocator in this run.
    pub fn automatic(&self) -> impl Iterator<Item = &TaskAssignment> {
        self.assignments.iter().filter(|a| !a.is_manual_override)
    }
}

/// Available staff for one slot, split by license qualification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCandidates {
    /// Employee ids holding a qualifying license.
    pub qualified: Vec<String>,
    /// Employee ids that are available but not qualified.
    pub unqualified: Vec<String>,
}
