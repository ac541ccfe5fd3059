//! Royale configuration
//!
//! Paths to the reference data, where reports go, and the defaults the CLI
//! falls back to when a flag is not given. Every field has a default, so an
//! empty TOML file is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, RoyaleError};

/// Configuration for royale runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoyaleConfig {
    // === REFERENCE DATA ===
    /// JSON array of countries, each with at least `name` and `iso2`
    pub countries_path: PathBuf,

    /// JSON object mapping `iso2` codes to arrays of city records
    pub cities_path: PathBuf,

    // === REPORTS ===
    /// Directory that receives report files when saving is enabled
    pub logs_dir: PathBuf,

    /// Write a report file after each run
    pub save_to_file: bool,

    /// Print the run's log lines to stdout
    pub print_to_console: bool,

    // === DEFAULTS ===
    /// Country used when `--country` is not given
    pub default_country: String,

    /// City tracked when `--track` is not given
    pub default_tracked_city: String,
}

impl Default for RoyaleConfig {
    fn default() -> Self {
        Self {
            countries_path: PathBuf::from("data/full_world_countries.json"),
            cities_path: PathBuf::from("data/world_cities.json"),
            logs_dir: PathBuf::from("logs"),
            save_to_file: false,
            print_to_console: true,
            default_country: "Canada".to_string(),
            default_tracked_city: "Vancouver".to_string(),
        }
    }
}

impl RoyaleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RoyaleConfig = toml::from_str(content)
            .map_err(|e| RoyaleError::Config(format!("Failed to parse config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.countries_path.as_os_str().is_empty() || self.cities_path.as_os_str().is_empty() {
            return Err(RoyaleError::Config("Reference data paths must not be empty".into()));
        }

        if self.logs_dir.as_os_str().is_empty() {
            return Err(RoyaleError::Config("logs_dir must not be empty".into()));
        }

        if self.default_country.trim().is_empty() || self.default_tracked_city.trim().is_empty() {
            return Err(RoyaleError::Config("Default country and tracked city must not be empty".into()));
        }

        Ok(())
    }
}
