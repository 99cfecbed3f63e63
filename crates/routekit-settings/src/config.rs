//! Configuration and settings management for routekit
//!
//! Provides configuration file handling and validation for the travel
//! planner. Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Path finding (clearance tolerance, detour limits)
//! - Route ordering (heuristic, coordinate quantization)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use routekit_camtools::{OrderingStrategy, ParameterError, TravelParameters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name used under the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Path finding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathFindingSettings {
    /// Clearance from region boundaries, in board units
    pub tolerance: f64,
    /// Longest accepted travel route as a percentage of the straight move
    pub max_detour_percent: f64,
    /// Longest accepted extra travel length; 0 disables the limit
    pub max_detour_absolute: f64,
}

impl Default for PathFindingSettings {
    fn default() -> Self {
        let params = TravelParameters::default();
        Self {
            tolerance: params.tolerance,
            max_detour_percent: params.max_detour_percent,
            max_detour_absolute: params.max_detour_absolute,
        }
    }
}

impl PathFindingSettings {
    /// Combines these settings with `ordering` into planner parameters.
    pub fn travel_parameters(&self, ordering: &OrderingSettings) -> TravelParameters {
        TravelParameters {
            tolerance: self.tolerance,
            max_detour_percent: self.max_detour_percent,
            max_detour_absolute: self.max_detour_absolute,
            ordering: ordering.strategy,
            quantization: ordering.quantization,
        }
    }
}

/// Route ordering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderingSettings {
    /// Ordering heuristic
    pub strategy: OrderingStrategy,
    /// Coordinate quantization of the input, if any
    pub quantization: f64,
}

/// Complete planner configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Path finding settings
    pub path_finding: PathFindingSettings,
    /// Route ordering settings
    pub ordering: OrderingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config location, e.g. `~/.config/routekit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("routekit").join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;
        if content.trim().is_empty() {
            return Err(ConfigError::Corrupted(format!("{} is empty", path.display())).into());
        }

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load config from file, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Planner parameters for these settings
    pub fn travel_parameters(&self) -> TravelParameters {
        self.path_finding.travel_parameters(&self.ordering)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.travel_parameters().validate().map_err(|e| match e {
            ParameterError::OutOfRange { name, value, .. } => ConfigError::ValueOutOfRange {
                key: setting_key(&name),
                value: value.to_string(),
            }
            .into(),
            ParameterError::InvalidValue { name, reason } => SettingsError::InvalidSetting {
                key: setting_key(&name),
                reason,
            },
        })
    }
}

/// Maps a planner parameter name to its dotted config key.
fn setting_key(parameter: &str) -> String {
    match parameter {
        "quantization" => "ordering.quantization".to_string(),
        other => format!("path_finding.{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_planner() {
        let config = Config::new();
        assert_eq!(config.travel_parameters(), TravelParameters::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [path_finding]
            tolerance = 0.05

            [ordering]
            strategy = "greedy"
            "#,
        )
        .unwrap();
        assert_eq!(config.path_finding.tolerance, 0.05);
        assert_eq!(config.path_finding.max_detour_percent, 200.0);
        assert_eq!(config.ordering.strategy, OrderingStrategy::Greedy);
    }

    #[test]
    fn test_validate_reports_key() {
        let mut config = Config::new();
        config.path_finding.tolerance = 0.0;
        match config.validate() {
            Err(SettingsError::InvalidSetting { key, .. }) => {
                assert_eq!(key, "path_finding.tolerance")
            }
            other => panic!("unexpected: {:?}", other),
        }

        let mut config = Config::new();
        config.path_finding.max_detour_absolute = -1.0;
        match config.validate() {
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { key, .. })) => {
                assert_eq!(key, "path_finding.max_detour_absolute")
            }
            other => panic!("unexpected: {:?}", other),
        }

        let mut config = Config::new();
        config.path_finding.max_detour_percent = 90.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));

        let mut config = Config::new();
        config.ordering.quantization = -0.5;
        match config.validate() {
            Err(SettingsError::Config(ConfigError::ValueOutOfRange { key, .. })) => {
                assert_eq!(key, "ordering.quantization")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let result = Config::new().save_to_file(Path::new("routekit.yaml"));
        assert!(matches!(
            result,
            Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
        ));
    }
}
