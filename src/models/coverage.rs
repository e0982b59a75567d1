//! Coverage figures for a single day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ShiftCode, TargetZone};

/// On-duty license tallies for one airframe.
///
/// Each employee lands in exactly one bucket, so a combined holder is
/// counted in `combined` and not in `b1` or `b2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseCounts {
    /// B1-only holders.
    pub b1: u32,
    /// B2-only holders.
    pub b2: u32,
    /// Combined B1/2 holders.
    pub combined: u32,
}

impl LicenseCounts {
    /// Staff able to fill a B1 slot.
    pub fn b1_capable(&self) -> u32 {
        self.b1 + self.combined
    }

    /// Staff able to fill a B2 slot.
    pub fn b2_capable(&self) -> u32 {
        self.b2 + self.combined
    }
}

/// Staffing analysis of one day, the basis of every eligibility rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCoverage {
    /// The analysed day.
    pub date: NaiveDate,
    /// Grade-weighted worked hours on the day.
    pub current_manhours: Decimal,
    /// The minimum manhours for the day (override or baseline).
    pub manhour_floor: Decimal,
    /// Roster employees on duty.
    pub on_duty_count: u32,
    /// Roster employees not on duty (including unassigned).
    pub off_duty_count: u32,
    /// Senior engineers on duty.
    pub seniors_on_duty: u32,
    /// Supervisors on duty.
    pub supervisors_on_duty: u32,
    /// On-duty staff whose primary license covers B1.
    pub b1_on_duty: u32,
    /// On-duty staff whose primary license covers B2.
    pub b2_on_duty: u32,
    /// On-duty staff whose primary license is Cat-A.
    pub cat_a_on_duty: u32,
    /// Roster total per primary license: B1 (incl. combined).
    pub total_b1: u32,
    /// Roster total per primary license: B2 (incl. combined).
    pub total_b2: u32,
    /// Roster total per primary license: Cat-A.
    pub total_cat_a: u32,
    /// Manhours if every non-management employee worked a nominal shift.
    pub theoretical_capacity: Decimal,
    /// Minimum on-duty B1 headcount.
    pub min_b1_required: u32,
    /// Minimum on-duty B2 headcount.
    pub min_b2_required: u32,
    /// Minimum on-duty Cat-A headcount.
    pub min_cat_a_required: u32,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// ISO week number of the day.
    pub iso_week: u32,
    /// Shift codes counted toward the daily target this week.
    pub cadence_codes: Vec<ShiftCode>,
    /// Non-management staff on a cadence code.
    pub daily_target_count: u32,
    /// Zone of the daily-target count.
    pub daily_target_zone: TargetZone,
}

impl DayCoverage {
    /// Label of the cadence codes for operator messages, e.g. `"Ea/e"`.
    pub fn cadence_label(&self) -> String {
        self.cadence_codes
            .iter()
            .map(ShiftCode::as_str)
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_counts_toward_both_roles() {
        let counts = LicenseCounts {
            b1: 2,
            b2: 1,
            combined: 3,
        };
        assert_eq!(counts.b1_capable(), 5);
        assert_eq!(counts.b2_capable(), 4);
    }
}
