//! Configuration types for the roster engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! built-in defaults used when no configuration directory is supplied.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AirframeType, ShiftCategory, ShiftCode, TargetZone};

/// Thresholds and cadence of the daily-target headcount.
///
/// The cadence alternates by ISO week parity: even weeks count one set of
/// duty codes, odd weeks another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTargetPolicy {
    /// Counts below this are red and block off-days.
    pub red_below: u32,
    /// Counts from this value on are green.
    pub green_from: u32,
    /// Codes counted in even ISO weeks.
    pub even_week_codes: Vec<ShiftCode>,
    /// Codes counted in odd ISO weeks.
    pub odd_week_codes: Vec<ShiftCode>,
}

impl Default for DailyTargetPolicy {
    fn default() -> Self {
        Self {
            red_below: 30,
            green_from: 35,
            even_week_codes: vec![ShiftCode::from("Ea"), ShiftCode::from("e")],
            odd_week_codes: vec![ShiftCode::from("La")],
        }
    }
}

impl DailyTargetPolicy {
    /// Returns the codes counted toward the daily target on a date.
    pub fn cadence_codes(&self, date: NaiveDate) -> &[ShiftCode] {
        if date.iso_week().week() % 2 == 0 {
            &self.even_week_codes
        } else {
            &self.odd_week_codes
        }
    }

    /// Classifies a daily-target headcount.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::config::DailyTargetPolicy;
    /// use roster_engine::models::TargetZone;
    ///
    /// let policy = DailyTargetPolicy::default();
    /// assert_eq!(policy.zone(29), TargetZone::Red);
    /// assert_eq!(policy.zone(30), TargetZone::Orange);
    /// assert_eq!(policy.zone(35), TargetZone::Green);
    /// ```
    pub fn zone(&self, count: u32) -> TargetZone {
        if count < self.red_below {
            TargetZone::Red
        } else if count < self.green_from {
            TargetZone::Orange
        } else {
            TargetZone::Green
        }
    }
}

/// Staffing floors and allocator limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingPolicy {
    /// Baseline minimum manhours per day.
    pub min_manhours: Decimal,
    /// Minimum senior engineers on duty.
    pub min_seniors: u32,
    /// Minimum supervisors on duty.
    pub min_supervisors: u32,
    /// Nominal hours of one person-shift, used for theoretical capacity.
    pub nominal_shift_hours: Decimal,
    /// Maximum aircraft per senior engineer per day.
    pub senior_aircraft_cap: u32,
    /// Consecutive duty days that raise a fatigue finding.
    pub fatigue_streak_days: u32,
    /// Daily-target thresholds and cadence.
    pub daily_target: DailyTargetPolicy,
}

impl Default for StaffingPolicy {
    fn default() -> Self {
        Self {
            min_manhours: Decimal::from(216),
            min_seniors: 6,
            min_supervisors: 2,
            nominal_shift_hours: Decimal::from(8),
            senior_aircraft_cap: 2,
            fatigue_streak_days: 7,
            daily_target: DailyTargetPolicy::default(),
        }
    }
}

/// One shift-code catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCodeEntry {
    /// The shift code.
    pub code: ShiftCode,
    /// Human-readable label.
    pub label: String,
    /// Nominal worked hours.
    pub hours: Decimal,
    /// Duty or off.
    pub category: ShiftCategory,
}

/// Shift catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftCatalogFile {
    /// Catalog entries, later entries override earlier ones.
    pub codes: Vec<ShiftCodeEntry>,
}

/// Result of a catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftLookup<'a> {
    /// The code is in the catalog.
    Known(&'a ShiftCodeEntry),
    /// The code is not in the catalog; treated as 0 hours, off duty.
    Unknown,
}

impl ShiftLookup<'_> {
    /// Nominal hours, 0 for unknown codes.
    pub fn hours(&self) -> Decimal {
        match self {
            ShiftLookup::Known(entry) => entry.hours,
            ShiftLookup::Unknown => Decimal::ZERO,
        }
    }

    /// Category, off for unknown codes.
    pub fn category(&self) -> ShiftCategory {
        match self {
            ShiftLookup::Known(entry) => entry.category,
            ShiftLookup::Unknown => ShiftCategory::Off,
        }
    }
}

use ShiftCategory::{Duty, Off};

const STANDARD_SHIFT_CODES: &[(&str, &str, u32, ShiftCategory)] = &[
    ("Ea", "Early", 8, Duty),
    ("La", "Late", 8, Duty),
    ("M", "Middle", 8, Duty),
    ("Ae", "Afternoon-Early", 8, Duty),
    ("AL", "Afternoon-Late", 8, Duty),
    ("e", "Extended Early", 10, Duty),
    ("eA", "Extended Alt", 10, Duty),
    ("l", "Late Extended", 10, Duty),
    ("LA", "Late Alt", 8, Duty),
    ("TD", "Part Time Day", 8, Duty),
    ("HO", "Home Office", 8, Duty),
    ("FT", "Public Holiday", 0, Off),
    ("V", "Vacation", 0, Off),
    ("T", "Training", 0, Off),
    ("S", "Sick w/ Cert", 0, Off),
    ("Sn", "School Night", 8, Duty),
    ("TR", "Training", 8, Duty),
    ("t4", "Training 4H", 4, Duty),
    ("?", "Unknown", 0, Off),
    ("-", "Off Day", 0, Off),
    ("OFF", "Off Day", 0, Off),
    ("I", "Unexp. Absence", 0, Off),
    ("SI", "School - off", 0, Off),
    ("ab", "Acc. hourly with Cert", 0, Off),
    ("AB", "Acc. with Certificate", 0, Off),
    ("ac", "Accident hourly", 0, Off),
    ("AC", "Accident with Certificate", 0, Off),
    ("ah", "Accident halfday", 0, Off),
    ("AP", "Accident (PEP)", 0, Off),
    ("aw", "Accident w/o Cert hourly", 0, Off),
    ("AW", "Accident without Certificate", 0, Off),
    ("ax", "Accident halfday (1/10)", 0, Off),
    ("AX", "Accident w/o Cert 1/5", 0, Off),
    ("B+", "Business Trip Request", 8, Duty),
    ("BE", "Bern", 8, Duty),
    ("BL", "Business Trip", 8, Duty),
    ("bt", "Business Trip hourly", 8, Duty),
    ("BT", "Business Trip", 8, Duty),
    ("CX", "Corona Off", 0, Off),
    ("ET", "Educational Trip", 8, Duty),
    ("f+", "Compensation requested", 0, Off),
    ("F+", "Flexitime", 0, Off),
    ("FD", "Flight Duty", 8, Duty),
    ("fl", "Halfday Compensation ex Flextime", 0, Off),
    ("FL", "Compensation ex Flextime", 0, Off),
    ("FO", "Flight Duty on Weekends", 8, Duty),
    ("GA", "Office Days", 0, Off),
    ("GE", "Geneva", 8, Duty),
    ("H+", "Home Office (Workflow)", 8, Duty),
    ("HC", "Home Office Corona", 8, Duty),
    ("hh", "Home Office halfday", 4, Duty),
    ("I+", "Home Office (Workflow)", 8, Duty),
    ("IB", "Baby Leave with Cert", 0, Off),
    ("ic", "Sick with Cert hourly", 0, Off),
    ("IC", "Sick with Certificate", 0, Off),
    ("ih", "Sick with Cert halfday", 0, Off),
    ("im", "Sick halfday pregnancy", 0, Off),
    ("IM", "Baby Leave", 0, Off),
    ("in", "Care of child hourly", 0, Off),
    ("IN", "Nurse of close relatives", 0, Off),
    ("IP", "Sick (PEP)", 0, Off),
    ("iw", "Sick w/o Cert hourly", 0, Off),
    ("IW", "Sick without Certificate", 0, Off),
    ("ix", "Sick halfday (1/10)", 0, Off),
    ("IX", "Sick w/o Cert 1/5", 0, Off),
    ("J", "Joker Day", 0, Off),
    ("K%", "Compensation withdrawn", 0, Off),
    ("k+", "Compensation requested", 0, Off),
    ("K+", "Compensation", 0, Off),
    ("ka", "Short-time work halfday", 0, Off),
    ("KA", "Short-time Work", 0, Off),
    ("kb", "Compensation ex time bonus", 0, Off),
    ("KB", "Compensation ex Timebonus", 0, Off),
    ("kh", "Compensation ex Overtime halfday", 0, Off),
    ("KH", "Compensation ex Overtime", 0, Off),
    ("KK", "Care of relatives 3d", 0, Off),
    ("ko", "Compensation ex Overtime hourly", 0, Off),
    ("KO", "Compensation ex Overtime", 0, Off),
    ("kx", "Compensation ex Overtime 1/10", 0, Off),
    ("L+", "Applying UBU", 0, Off),
    ("M%", "Military withdrawn", 0, Off),
    ("M+", "Military applied", 0, Off),
];

/// The shift-code catalog: hours and duty category per code.
///
/// Unknown codes are not an error: [`ShiftCatalog::lookup`] returns
/// [`ShiftLookup::Unknown`], which counts as 0 hours and off duty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCatalog {
    entries: HashMap<ShiftCode, ShiftCodeEntry>,
}

impl ShiftCatalog {
    /// Creates a catalog from entries; later entries override earlier ones.
    pub fn new(entries: impl IntoIterator<Item = ShiftCodeEntry>) -> Self {
        let mut catalog = Self {
            entries: HashMap::new(),
        };
        catalog.extend(entries);
        catalog
    }

    /// The built-in catalog of the maintenance base.
    pub fn standard() -> Self {
        Self::new(
            STANDARD_SHIFT_CODES
                .iter()
                .map(|&(code, label, hours, category)| ShiftCodeEntry {
                    code: ShiftCode::from(code),
                    label: label.to_string(),
                    hours: Decimal::from(hours),
                    category,
                }),
        )
    }

    /// Adds or replaces entries.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = ShiftCodeEntry>) {
        for entry in entries {
            self.entries.insert(entry.code.clone(), entry);
        }
    }

    /// Looks a code up.
    pub fn lookup(&self, code: &ShiftCode) -> ShiftLookup<'_> {
        match self.entries.get(code) {
            Some(entry) => ShiftLookup::Known(entry),
            None => ShiftLookup::Unknown,
        }
    }

    /// Nominal worked hours of a code.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::config::ShiftCatalog;
    /// use roster_engine::models::ShiftCode;
    /// use rust_decimal::Decimal;
    ///
    /// let catalog = ShiftCatalog::standard();
    /// assert_eq!(catalog.hours_of(&ShiftCode::from("e")), Decimal::from(10));
    /// assert_eq!(catalog.hours_of(&ShiftCode::from("ZZ")), Decimal::ZERO);
    /// ```
    pub fn hours_of(&self, code: &ShiftCode) -> Decimal {
        self.lookup(code).hours()
    }

    /// Whether a code is worked time.
    pub fn is_on_duty(&self, code: &ShiftCode) -> bool {
        self.lookup(code).category() == ShiftCategory::Duty
    }

    /// Category of a code.
    pub fn category_of(&self, code: &ShiftCode) -> ShiftCategory {
        self.lookup(code).category()
    }

    /// Number of codes in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by code.
    pub fn entries(&self) -> Vec<&ShiftCodeEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }
}

impl Default for ShiftCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compatibility file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilityFile {
    /// Declared airframe to the airframes it may service.
    pub compatibility: BTreeMap<AirframeType, BTreeSet<AirframeType>>,
}

/// Which airframes a license on one type may service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityTable {
    adjacency: BTreeMap<AirframeType, BTreeSet<AirframeType>>,
}

impl CompatibilityTable {
    /// Creates a table from an adjacency map.
    pub fn new(adjacency: BTreeMap<AirframeType, BTreeSet<AirframeType>>) -> Self {
        Self { adjacency }
    }

    /// The built-in table: NEO and CFM narrowbody ratings extend to their
    /// re-engined relatives; every other type services only itself.
    pub fn standard() -> Self {
        use AirframeType::*;

        let mut adjacency = BTreeMap::new();
        adjacency.insert(A320Neo, BTreeSet::from([A320Neo, A321Rr, A321Neo]));
        adjacency.insert(A320Cf, BTreeSet::from([A320Cf, A321Rr]));
        adjacency.insert(A321Neo, BTreeSet::from([A321Neo, A321Rr]));
        for airframe in [A321Rr, B777, A343, A220, A330Rr, A350] {
            adjacency.insert(airframe, BTreeSet::from([airframe]));
        }
        Self { adjacency }
    }

    /// Whether a license declared on `declared` may service `target`.
    ///
    /// Types absent from the table fall back to strict equality.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::config::CompatibilityTable;
    /// use roster_engine::models::AirframeType;
    ///
    /// let table = CompatibilityTable::standard();
    /// assert!(table.can_service(AirframeType::A320Neo, AirframeType::A321Rr));
    /// assert!(!table.can_service(AirframeType::A321Rr, AirframeType::A320Neo));
    /// ```
    pub fn can_service(&self, declared: AirframeType, target: AirframeType) -> bool {
        match self.adjacency.get(&declared) {
            Some(serviceable) => serviceable.contains(&target),
            None => declared == target,
        }
    }
}

impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// The complete roster configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterConfig {
    /// Staffing floors and limits.
    pub policy: StaffingPolicy,
    /// Shift-code catalog.
    pub shifts: ShiftCatalog,
    /// License compatibility table.
    pub compatibility: CompatibilityTable,
}

impl RosterConfig {
    /// Built-in defaults.
    pub fn standard() -> Self {
        Self::default()
    }
}
