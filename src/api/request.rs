//! Request types for the Roster Engine API.
//!
//! Every request carries the caller's [`ScheduleSnapshot`]; the server keeps
//! no roster state between requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    Aircraft, AirframeType, OffDayRequest, ScheduleSnapshot, TaskAssignment, WorkRequirement,
};

/// Request body for the `/manhours` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManhoursRequest {
    /// The schedule to evaluate.
    pub snapshot: ScheduleSnapshot,
    /// The day to report.
    pub date: NaiveDate,
    /// Also total the Monday-to-Sunday week containing `date`.
    #[serde(default)]
    pub include_week: bool,
}

/// Request body for the `/license-counts` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseCountsRequest {
    /// The schedule to evaluate.
    pub snapshot: ScheduleSnapshot,
    /// The day to report.
    pub date: NaiveDate,
    /// The airframe to count license holders for.
    pub airframe: AirframeType,
}

/// Request body for the `/eligibility` endpoint.
///
/// The off-day fields sit at the top level next to the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// The schedule to evaluate.
    pub snapshot: ScheduleSnapshot,
    /// The leave to simulate.
    #[serde(flatten)]
    pub off_days: OffDayRequest,
}

/// Request body for the `/auto-assign` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoAssignRequest {
    /// The schedule; on-duty staff are resolved from it.
    pub snapshot: ScheduleSnapshot,
    /// The day to allocate.
    pub date: NaiveDate,
    /// The fleet.
    pub aircraft: Vec<Aircraft>,
    /// Work requirements.
    pub requirements: Vec<WorkRequirement>,
    /// Operator-pinned assignments.
    #[serde(default)]
    pub manual_assignments: Vec<TaskAssignment>,
    /// Seed for reproducible tie-breaking; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Request body for the `/audit` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// The schedule to audit.
    pub snapshot: ScheduleSnapshot,
}
