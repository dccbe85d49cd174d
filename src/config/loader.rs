//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the position
//! catalog, the starting roster and process settings from a directory.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::engine::{PayrollState, PositionCatalog};
use crate::error::{PayrollError, PayrollResult};
use crate::models::RosterRecord;

use super::types::{CatalogConfig, PayrollSettings};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── payroll.yaml    # Optional settings
/// ├── positions.yaml  # Position catalog
/// └── employees.csv   # Starting roster
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let state = loader.build_state(today).unwrap();
/// println!("{} employees on the roster", state.employees().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: PayrollSettings,
    catalog: PositionCatalog,
    roster: Vec<RosterRecord>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `positions.yaml` or `employees.csv` is missing
    /// or malformed. A missing `payroll.yaml` falls back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("payroll.yaml");
        let settings = if settings_path.exists() {
            Self::load_yaml::<PayrollSettings>(&settings_path)?
        } else {
            PayrollSettings::default()
        };

        let catalog_path = path.join("positions.yaml");
        let catalog_config = Self::load_yaml::<CatalogConfig>(&catalog_path)?;
        let catalog = PositionCatalog::new(catalog_config.positions()?)?;

        let roster_path = path.join("employees.csv");
        let roster = Self::load_roster(&roster_path)?;

        info!(
            path = %path.display(),
            positions = catalog.len(),
            employees = roster.len(),
            "Configuration loaded"
        );
        Ok(Self {
            settings,
            catalog,
            roster,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads the roster records file.
    fn load_roster(path: &Path) -> PayrollResult<Vec<RosterRecord>> {
        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        RosterRecord::parse_all(&content)
    }

    /// Returns the process settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the position catalog.
    pub fn catalog(&self) -> &PositionCatalog {
        &self.catalog
    }

    /// Returns the starting roster.
    pub fn roster(&self) -> &[RosterRecord] {
        &self.roster
    }

    /// Builds a fresh payroll state with the clock on `today`.
    pub fn build_state(&self, today: NaiveDate) -> PayrollResult<PayrollState> {
        PayrollState::from_roster(
            self.catalog.clone(),
            &self.roster,
            today,
            self.settings.email_domain.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_path() -> &'static str {
        "./config"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().company_name, "UL Payroll System");
        assert!(!loader.catalog().is_empty());
        assert!(!loader.roster().is_empty());
    }

    #[test]
    fn test_every_roster_position_is_in_the_catalog() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        for record in loader.roster() {
            assert!(
                loader.catalog().lookup(&record.position_title).is_ok(),
                "{} has unknown position {}",
                record.name,
                record.position_title
            );
        }
    }

    #[test]
    fn test_build_state_admits_whole_roster() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let state = loader.build_state(today).unwrap();

        assert_eq!(state.employees().len(), loader.roster().len());
        assert_eq!(state.credentials().len(), loader.roster().len());
        assert_eq!(state.today(), today);
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        let result = ConfigLoader::load("./config/does-not-exist");
        assert!(matches!(result, Err(PayrollError::ConfigNotFound { .. })));
    }
}
