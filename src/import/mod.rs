//! Import boundary for roster data.
//!
//! Everything entering the engine from files or sheets is validated here;
//! the calculation modules assume typed, well-formed input.

mod rows;
mod skills;
mod snapshot_file;

pub use rows::{AssignmentRow, parse_assignment_rows, parse_sheet_date};
pub use skills::{SkillCell, SkillImport, parse_skill_row};
pub use snapshot_file::{SNAPSHOT_VERSION, validate_roster};
