//! routekit Settings Crate
//!
//! Handles planner configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, OrderingSettings, PathFindingSettings, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
