//! Configuration loading and management for the Roster Engine.
//!
//! This module provides the staffing policy, the shift-code catalog and
//! the airframe compatibility table, either built in or loaded from YAML.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/roster").unwrap();
//! println!("Senior floor: {}", loader.policy().min_seniors);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompatibilityTable, DailyTargetPolicy, RosterConfig, ShiftCatalog, ShiftCodeEntry,
    ShiftLookup, StaffingPolicy,
};
