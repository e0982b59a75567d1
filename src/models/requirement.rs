//! Aircraft work requirements.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{SpecialSkill, TaskRole};

/// Standard length of one person-shift in hours.
pub const HOURS_PER_PERSON: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Ordering priority of a work requirement.
///
/// Priority only affects the order in which the allocator visits
/// requirements; it is never a hard constraint.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must be served first.
    Urgent,
    /// Served before normal work.
    High,
    /// Default priority.
    #[default]
    Normal,
    /// Served last.
    Low,
}

/// Staffing demand for one aircraft on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRequirement {
    /// Unique identifier for the requirement.
    pub id: String,
    /// The day the work takes place.
    pub date: NaiveDate,
    /// The aircraft to be worked on.
    pub aircraft_id: String,
    /// Required B1 headcount.
    #[serde(default)]
    pub b1_required: u32,
    /// Required B2 headcount.
    #[serde(default)]
    pub b2_required: u32,
    /// Required Cat-A or helper headcount.
    #[serde(default)]
    pub cat_a_required: u32,
    /// Allocation priority.
    #[serde(default)]
    pub priority: Priority,
    /// Special skills the crew should bring.
    #[serde(default)]
    pub special_skills_required: BTreeSet<SpecialSkill>,
    /// Borescope inspection planned (informational).
    #[serde(default)]
    pub boroscope_required: bool,
    /// Engine run planned (informational).
    #[serde(default)]
    pub engine_run_required: bool,
}

impl WorkRequirement {
    /// Creates a requirement with the given headcounts at normal priority.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        aircraft_id: impl Into<String>,
        b1_required: u32,
        b2_required: u32,
        cat_a_required: u32,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            aircraft_id: aircraft_id.into(),
            b1_required,
            b2_required,
            cat_a_required,
            priority: Priority::Normal,
            special_skills_required: BTreeSet::new(),
            boroscope_required: false,
            engine_run_required: false,
        }
    }

    /// Sets the B1, B2 and Cat-A headcounts from total task hours.
    pub fn with_hours(mut self, b1_hours: Decimal, b2_hours: Decimal, cat_a_hours: Decimal) -> Self {
        self.b1_required = persons_from_hours(b1_hours);
        self.b2_required = persons_from_hours(b2_hours);
        self.cat_a_required = persons_from_hours(cat_a_hours);
        self
    }

    /// Total headcount over all roles.
    pub fn total_required(&self) -> u32 {
        self.b1_required + self.b2_required + self.cat_a_required
    }

    /// Required headcount of one role.
    pub fn required_for(&self, role: TaskRole) -> u32 {
        match role {
            TaskRole::B1 => self.b1_required,
            TaskRole::B2 => self.b2_required,
            TaskRole::CatAHelper => self.cat_a_required,
        }
    }
}

/// Converts total task hours into a headcount of standard person-shifts.
///
/// Rounds up; zero or negative hours need nobody.
///
/// # Examples
///
/// ```
/// use roster_engine::models::persons_from_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(persons_from_hours(Decimal::new(17, 0)), 3);
/// assert_eq!(persons_from_hours(Decimal::new(16, 0)), 2);
/// assert_eq!(persons_from_hours(Decimal::ZERO), 0);
/// ```
pub fn persons_from_hours(total_hours: Decimal) -> u32 {
    if total_hours <= Decimal::ZERO {
        return 0;
    }
    (total_hours / HOURS_PER_PERSON)
        .ceil()
        .to_u32()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_priority_orders_urgent_first() {
        let mut priorities = vec![Priority::Low, Priority::Urgent, Priority::Normal, Priority::High];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::Urgent, Priority::High, Priority::Normal, Priority::Low]
        );
    }

    #[test]
    fn test_persons_from_fractional_hours_rounds_up() {
        assert_eq!(persons_from_hours(dec("0.5")), 1);
        assert_eq!(persons_from_hours(dec("8.01")), 2);
        assert_eq!(persons_from_hours(dec("-4")), 0);
    }

    #[test]
    fn test_with_hours_derives_headcounts() {
        let requirement = WorkRequirement::new("wr-1", test_date(), "a350-1", 0, 0, 0)
            .with_hours(dec("24"), dec("10"), dec("0"));
        assert_eq!(requirement.b1_required, 3);
        assert_eq!(requirement.b2_required, 2);
        assert_eq!(requirement.cat_a_required, 0);
        assert_eq!(requirement.total_required(), 5);
    }

    #[test]
    fn test_deserialize_requirement_defaults() {
        let json = r#"{
            "id": "wr-1",
            "date": "2026-01-15",
            "aircraft_id": "a350-1",
            "b1_required": 2
        }"#;
        let requirement: WorkRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(requirement.priority, Priority::Normal);
        assert_eq!(requirement.b2_required, 0);
        assert!(requirement.special_skills_required.is_empty());
        assert!(!requirement.boroscope_required);
    }
}
