//! Skill-sheet rows.
//!
//! A skill sheet lists, per employee, type-rating cells such as
//! `"A350: B1"` and free-text certification cells. Cells marked as flagged
//! (highlighted on the sheet) are planned training, not held qualifications.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AirframeType, License, SkillEntry, SpecialSkill};

/// One cell of a skill-sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCell {
    /// Cell text.
    pub text: String,
    /// Highlighted on the sheet; the qualification is only planned.
    #[serde(default)]
    pub flagged: bool,
}

impl SkillCell {
    /// A held qualification.
    pub fn held(text: &str) -> Self {
        Self {
            text: text.to_string(),
            flagged: false,
        }
    }

    /// A planned qualification.
    pub fn planned(text: &str) -> Self {
        Self {
            text: text.to_string(),
            flagged: true,
        }
    }
}

/// Qualifications read from one skill-sheet row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillImport {
    /// Held type ratings.
    pub skills: Vec<SkillEntry>,
    /// Held free-text certifications.
    pub certifications: Vec<String>,
    /// Certifications that map onto a known special skill.
    pub special_skills: BTreeSet<SpecialSkill>,
    /// Flagged cells, verbatim.
    pub training_planned: Vec<String>,
}

/// Splits `"<airframe>: <license>"` into its parts when the left side is a
/// known airframe.
fn split_rating(text: &str) -> Option<(AirframeType, &str)> {
    let (airframe, license) = text.split_once(':')?;
    AirframeType::from_label(airframe).map(|a| (a, license.trim()))
}

/// Reads one skill-sheet row.
///
/// An `A320 CF` rating whose license carries an `N` suffix (e.g. `B1 N`)
/// also grants the same license on the `A320 NEO`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmployee`] for a rating cell on a known
/// airframe whose license cannot be read.
pub fn parse_skill_row(cells: &[SkillCell]) -> EngineResult<SkillImport> {
    let mut import = SkillImport::default();

    for cell in cells {
        let text = cell.text.trim();
        if text.is_empty() {
            continue;
        }
        if cell.flagged {
            import.training_planned.push(text.to_string());
            continue;
        }

        match split_rating(text) {
            Some((airframe, license_text)) => {
                let license =
                    License::from_label(license_text).ok_or_else(|| EngineError::InvalidEmployee {
                        field: "skills".to_string(),
                        message: format!("unknown license '{}' in '{}'", license_text, text),
                    })?;
                import.skills.push(SkillEntry {
                    aircraft_type: airframe,
                    license: Some(license),
                });
                let neo_suffix = license_text
                    .to_ascii_uppercase()
                    .trim_start_matches("B1/2")
                    .contains('N');
                if airframe == AirframeType::A320Cf && neo_suffix {
                    import.skills.push(SkillEntry {
                        aircraft_type: AirframeType::A320Neo,
                        license: Some(license),
                    });
                }
            }
            None => {
                if let Some(skill) = SpecialSkill::from_label(text) {
                    import.special_skills.insert(skill);
                }
                import.certifications.push(text.to_string());
            }
        }
    }

    Ok(import)
}
