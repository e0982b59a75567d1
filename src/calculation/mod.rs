//! Calculation logic for the Roster Engine.
//!
//! This module contains the duty classifier joins, license compatibility
//! resolution, manhour and coverage aggregation, off-day eligibility
//! checking, the automatic aircraft allocator, and the schedule audit.
//! Every function is synchronous and works on caller-owned snapshots.

mod allocation;
mod audit;
mod compatibility;
mod coverage;
mod duty;
mod eligibility;

pub use allocation::{AllocationInput, add_manual_assignment, run_auto_assignment, slot_candidates};
pub use audit::audit_schedule;
pub use compatibility::{can_fill, holds_combined, license_for, qualifying_skill};
pub use coverage::{
    analyze_day, category_minimum, license_counts, manhours, theoretical_capacity, week_dates,
    weekly_manhours,
};
pub use duty::{DayShift, contribution, day_shifts, on_duty_employees};
pub use eligibility::{
    MAX_WINDOW_DAYS, RULE_B1, RULE_B2, RULE_CAT_A, RULE_DAILY_TARGET, RULE_LICENSE_SUMMARY,
    RULE_MANHOURS, RULE_SENIORS, RULE_SUPERVISORS, RULE_WEEKEND, apply_off_days,
    check_off_day_eligibility,
};
