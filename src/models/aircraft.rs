//! Aircraft model and airframe types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The airframe types operated by the maintenance base.
///
/// Serialized with the labels used on roster sheets (e.g. `"A320 NEO"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AirframeType {
    /// Boeing 777.
    #[serde(rename = "B777", alias = "777")]
    B777,
    /// Airbus A340-300.
    #[serde(rename = "A343")]
    A343,
    /// Airbus A220.
    #[serde(rename = "A220")]
    A220,
    /// Airbus A330 with Rolls-Royce engines.
    #[serde(rename = "A330 RR")]
    A330Rr,
    /// Airbus A350.
    #[serde(rename = "A350")]
    A350,
    /// Airbus A320neo.
    #[serde(rename = "A320 NEO")]
    A320Neo,
    /// Airbus A320 with CFM engines.
    #[serde(rename = "A320 CF")]
    A320Cf,
    /// Airbus A321neo.
    #[serde(rename = "A321 NEO")]
    A321Neo,
    /// Airbus A321 re-engined variant.
    #[serde(rename = "A321RR")]
    A321Rr,
}

impl AirframeType {
    /// All airframe types in fleet order.
    pub const ALL: [AirframeType; 9] = [
        AirframeType::B777,
        AirframeType::A343,
        AirframeType::A220,
        AirframeType::A330Rr,
        AirframeType::A350,
        AirframeType::A320Neo,
        AirframeType::A320Cf,
        AirframeType::A321Neo,
        AirframeType::A321Rr,
    ];

    /// The label used on roster sheets.
    pub fn label(self) -> &'static str {
        match self {
            AirframeType::B777 => "B777",
            AirframeType::A343 => "A343",
            AirframeType::A220 => "A220",
            AirframeType::A330Rr => "A330 RR",
            AirframeType::A350 => "A350",
            AirframeType::A320Neo => "A320 NEO",
            AirframeType::A320Cf => "A320 CF",
            AirframeType::A321Neo => "A321 NEO",
            AirframeType::A321Rr => "A321RR",
        }
    }

    /// Parses a sheet label, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::AirframeType;
    ///
    /// assert_eq!(AirframeType::from_label("a320 neo"), Some(AirframeType::A320Neo));
    /// assert_eq!(AirframeType::from_label("777"), Some(AirframeType::B777));
    /// assert_eq!(AirframeType::from_label("DC-10"), None);
    /// ```
    pub fn from_label(text: &str) -> Option<Self> {
        let wanted = text.trim();
        if wanted == "777" {
            return Some(AirframeType::B777);
        }
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for AirframeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An aircraft of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Unique identifier for the aircraft.
    pub id: String,
    /// Registration mark (e.g. "HB-JNA").
    pub registration: String,
    /// The airframe type.
    pub airframe: AirframeType,
    /// Operating company tag (e.g. "LX").
    #[serde(default)]
    pub company: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airframe_serializes_with_sheet_label() {
        assert_eq!(
            serde_json::to_string(&AirframeType::A330Rr).unwrap(),
            "\"A330 RR\""
        );
        assert_eq!(
            serde_json::to_string(&AirframeType::A321Rr).unwrap(),
            "\"A321RR\""
        );
    }

    #[test]
    fn test_legacy_777_label_is_accepted() {
        let parsed: AirframeType = serde_json::from_str("\"777\"").unwrap();
        assert_eq!(parsed, AirframeType::B777);
    }

    #[test]
    fn test_display_matches_label() {
        for airframe in AirframeType::ALL {
            assert_eq!(airframe.to_string(), airframe.label());
            assert_eq!(AirframeType::from_label(airframe.label()), Some(airframe));
        }
    }

    #[test]
    fn test_deserialize_aircraft() {
        let json = r#"{
            "id": "b777-1",
            "registration": "HB-JNA",
            "airframe": "B777",
            "company": "LX"
        }"#;
        let aircraft: Aircraft = serde_json::from_str(json).unwrap();
        assert_eq!(aircraft.airframe, AirframeType::B777);
        assert_eq!(aircraft.registration, "HB-JNA");
    }
}
