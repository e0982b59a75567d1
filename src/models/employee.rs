//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct together with the role,
//! license and special-skill vocabularies used throughout the engine.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::AirframeType;

/// The organisational role of an employee.
///
/// Managers and supervisors are never placed on aircraft by the allocator;
/// senior engineers are subject to the daily workload cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Production manager.
    #[serde(alias = "PM")]
    Manager,
    /// Shift supervisor.
    #[serde(alias = "PS")]
    Supervisor,
    /// Senior engineer.
    #[serde(alias = "SrEng")]
    SeniorEngineer,
    /// Regular engineer or mechanic.
    #[serde(alias = "Eng")]
    Engineer,
}

impl Role {
    /// Returns true for roles that are never assigned to aircraft work.
    pub fn is_management(self) -> bool {
        matches!(self, Role::Manager | Role::Supervisor)
    }
}

/// An aircraft maintenance license tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    /// Mechanical systems.
    B1,
    /// Avionics and electrical systems.
    B2,
    /// Combined B1/B2 credential, satisfies both.
    #[serde(rename = "B1/2")]
    B1B2,
    /// Basic line-maintenance qualification.
    #[serde(rename = "A")]
    CatA,
    /// Base maintenance certifying staff.
    C,
}

impl License {
    /// Returns true if the license satisfies a B1 requirement.
    pub fn covers_b1(self) -> bool {
        matches!(self, License::B1 | License::B1B2)
    }

    /// Returns true if the license satisfies a B2 requirement.
    pub fn covers_b2(self) -> bool {
        matches!(self, License::B2 | License::B1B2)
    }

    /// Parses a license as written on skill sheets.
    ///
    /// `B1/2` and `B1-2` are the combined license; other text starting with
    /// `B1` or `B2` (e.g. `B1 N`) is the plain tier.
    pub fn from_label(text: &str) -> Option<Self> {
        let upper = text.trim().to_ascii_uppercase();
        match upper.as_str() {
            "B1/2" | "B1-2" => Some(License::B1B2),
            "A" => Some(License::CatA),
            "C" => Some(License::C),
            s if s.starts_with("B1") => Some(License::B1),
            s if s.starts_with("B2") => Some(License::B2),
            _ => None,
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            License::B1 => "B1",
            License::B2 => "B2",
            License::B1B2 => "B1/2",
            License::CatA => "A",
            License::C => "C",
        };
        f.write_str(label)
    }
}

/// One `(aircraft type, license)` pair from an employee's skill list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// The airframe the license was issued for.
    pub aircraft_type: AirframeType,
    /// The license held, if any.
    pub license: Option<License>,
}

/// Special certifications that work requirements can ask for.
///
/// Membership is exact; free-text certification strings are mapped onto
/// this enum once, at the import boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialSkill {
    /// Fuel tank entry.
    FuelTank,
    /// Walliclean surface treatment.
    Walliclean,
    /// Forklift operation.
    Forklift,
    /// Cyclean engine wash.
    Cyclean,
    /// Cobra cleaning system.
    Cobra,
    /// Cee-Bee chemical cleaning.
    CeeBee,
    /// Portable oxygen handling.
    OxyHand,
    /// Confined space entry.
    Entry,
}

impl SpecialSkill {
    /// All known special skills in canonical order.
    pub const ALL: [SpecialSkill; 8] = [
        SpecialSkill::FuelTank,
        SpecialSkill::Walliclean,
        SpecialSkill::Forklift,
        SpecialSkill::Cyclean,
        SpecialSkill::Cobra,
        SpecialSkill::CeeBee,
        SpecialSkill::OxyHand,
        SpecialSkill::Entry,
    ];

    /// The certification label used on roster sheets.
    pub fn label(self) -> &'static str {
        match self {
            SpecialSkill::FuelTank => "FUEL TANK",
            SpecialSkill::Walliclean => "Walliclean",
            SpecialSkill::Forklift => "Forklift",
            SpecialSkill::Cyclean => "CYCLEAN",
            SpecialSkill::Cobra => "Cobra",
            SpecialSkill::CeeBee => "Cee Bee",
            SpecialSkill::OxyHand => "OXY Hand",
            SpecialSkill::Entry => "ENTRY",
        }
    }

    /// Resolves a certification label, ignoring case and surrounding spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::SpecialSkill;
    ///
    /// assert_eq!(SpecialSkill::from_label(" fuel tank "), Some(SpecialSkill::FuelTank));
    /// assert_eq!(SpecialSkill::from_label("A350 Boro"), None);
    /// ```
    pub fn from_label(text: &str) -> Option<Self> {
        let wanted = text.trim();
        Self::ALL
            .into_iter()
            .find(|skill| skill.label().eq_ignore_ascii_case(wanted))
    }
}

/// Represents a technician or manager on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short code, unique within the active roster and used as the import join key.
    pub initials: String,
    /// Organisational department.
    #[serde(default)]
    pub department: String,
    /// The employee's role.
    pub role: Role,
    /// Fractional capacity in percent (0-100), multiplies worked hours.
    pub grade: u8,
    /// Ordered list of aircraft licenses.
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    /// Free-text certifications as they appear on roster sheets.
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Special skills usable for requirement matching.
    #[serde(default)]
    pub special_skills: BTreeSet<SpecialSkill>,
}

impl Employee {
    /// Returns true if the employee is a senior engineer.
    pub fn is_senior(&self) -> bool {
        self.role == Role::SeniorEngineer
    }

    /// Returns true if the employee is a shift supervisor.
    pub fn is_supervisor(&self) -> bool {
        self.role == Role::Supervisor
    }

    /// Returns true if every skill entry is a Cat-A license.
    ///
    /// An employee without any skill entries is not Cat-A-only.
    pub fn is_cat_a_only(&self) -> bool {
        !self.skills.is_empty()
            && self
                .skills
                .iter()
                .all(|s| s.license == Some(License::CatA))
    }

    /// Returns the strongest license across all skill entries.
    ///
    /// Precedence is combined B1/2, then B1, B2, Cat-A and C.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{AirframeType, Employee, License, Role, SkillEntry};
    ///
    /// let employee = Employee {
    ///     id: "3".to_string(),
    ///     name: "Calabrese, Crescenzio".to_string(),
    ///     initials: "YCCR".to_string(),
    ///     department: "S/TMBAA".to_string(),
    ///     role: Role::SeniorEngineer,
    ///     grade: 100,
    ///     skills: vec![
    ///         SkillEntry { aircraft_type: AirframeType::A343, license: Some(License::B2) },
    ///         SkillEntry { aircraft_type: AirframeType::A350, license: Some(License::B1) },
    ///     ],
    ///     certifications: vec![],
    ///     special_skills: Default::default(),
    /// };
    /// assert_eq!(employee.primary_license(), Some(License::B1));
    /// ```
    pub fn primary_license(&self) -> Option<License> {
        const PRECEDENCE: [License; 5] = [
            License::B1B2,
            License::B1,
            License::B2,
            License::CatA,
            License::C,
        ];
        PRECEDENCE
            .into_iter()
            .find(|wanted| self.skills.iter().any(|s| s.license == Some(*wanted)))
    }

    /// Counts how many of the required special skills the employee holds.
    pub fn matching_skill_count(&self, required: &BTreeSet<SpecialSkill>) -> usize {
        required
            .iter()
            .filter(|skill| self.special_skills.contains(*skill))
            .count()
    }
}
