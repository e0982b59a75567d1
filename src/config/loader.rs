//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the roster
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CompatibilityFile, CompatibilityTable, RosterConfig, ShiftCatalog, ShiftCatalogFile,
    StaffingPolicy,
};

/// Loads and provides access to the roster configuration.
///
/// # Directory Structure
///
/// ```text
/// config/roster/
/// ├── policy.yaml         # Staffing floors, allocator limits, daily target
/// ├── shift_codes.yaml    # Shift codes layered over the built-in catalog
/// └── compatibility.yaml  # Airframe license compatibility
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/roster")?;
/// println!("Minimum manhours: {}", loader.policy().min_manhours);
/// # Ok::<(), roster_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RosterConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any of the three files is missing or does not
    /// parse.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<StaffingPolicy>(&path.join("policy.yaml"))?;

        let shift_file = Self::load_yaml::<ShiftCatalogFile>(&path.join("shift_codes.yaml"))?;
        let mut shifts = ShiftCatalog::standard();
        shifts.extend(shift_file.codes);

        let compatibility_file =
            Self::load_yaml::<CompatibilityFile>(&path.join("compatibility.yaml"))?;
        let compatibility = CompatibilityTable::new(compatibility_file.compatibility);

        Ok(Self {
            config: RosterConfig {
                policy,
                shifts,
                compatibility,
            },
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: RosterConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying roster configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Returns the staffing policy.
    pub fn policy(&self) -> &StaffingPolicy {
        &self.config.policy
    }

    /// Returns the shift-code catalog.
    pub fn shifts(&self) -> &ShiftCatalog {
        &self.config.shifts
    }

    /// Returns the compatibility table.
    pub fn compatibility(&self) -> &CompatibilityTable {
        &self.config.compatibility
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(RosterConfig::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirframeType, ShiftCode};
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/roster"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy().min_manhours, Decimal::from(216));
        assert_eq!(loader.policy().min_seniors, 6);
        assert_eq!(loader.policy().min_supervisors, 2);
        assert_eq!(loader.policy().daily_target.red_below, 30);
        assert_eq!(loader.policy().daily_target.green_from, 35);
    }

    #[test]
    fn test_loaded_configuration_matches_standard() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &RosterConfig::standard());
    }

    #[test]
    fn test_shift_codes_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.shifts().hours_of(&ShiftCode::from("Ea")), Decimal::from(8));
        assert!(!loader.shifts().is_on_duty(&ShiftCode::from("V")));
    }

    #[test]
    fn test_compatibility_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(
            loader
                .compatibility()
                .can_service(AirframeType::A320Neo, AirframeType::A321Rr)
        );
        assert!(
            !loader
                .compatibility()
                .can_service(AirframeType::A350, AirframeType::A330Rr)
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = std::env::temp_dir().join(format!("roster-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("policy.yaml"), "min_manhours: [not, a, number]\n").unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).ok();

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
