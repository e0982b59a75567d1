//! Schedule audit findings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What kind of defect an audit finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// More than one shift for the same employee and date.
    Duplicate,
    /// A shift referencing an employee missing from the roster.
    UnknownEmployee,
    /// A long run of consecutive duty days.
    Fatigue,
}

/// Severity of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational.
    Low,
    /// Should be reviewed.
    Medium,
    /// Data-integrity defect.
    High,
}

/// One audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditIssue {
    /// The defect kind.
    pub kind: IssueKind,
    /// How serious it is.
    pub severity: Severity,
    /// The employee concerned.
    pub employee_id: String,
    /// The day concerned.
    pub date: NaiveDate,
    /// Human-readable description.
    pub message: String,
}
