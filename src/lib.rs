//! # routekit
//!
//! Travel planning for CNC milling of circuit boards and similar work:
//! - Obstacle-avoiding rapid moves inside a keep-in region and outside a
//!   keep-out region, with a clearance tolerance
//! - Visiting order for sub-paths, drill holes and slots
//!
//! ## Architecture
//!
//! routekit is organized as a workspace with multiple crates:
//!
//! 1. **routekit-core** - Geometry types, validation, core errors
//! 2. **routekit-camtools** - Path finding, route ordering, travel planner
//! 3. **routekit-settings** - Planner configuration and persistence
//! 4. **routekit** - Logging setup and re-exports of the crates above

use anyhow::Context;
use std::path::Path;

pub use routekit_camtools::{
    nearest_neighbour, reorder, tour_length, tsp_2opt, unlimited, CamToolError, CamToolResult,
    OrderingStrategy, ParameterError, PathFindingSurface, RingIndices, SearchOutcome, TravelMove,
    TravelParameters, TravelPlan, TravelPlanner, Visitable, VisibilityCache,
};
pub use routekit_core::{
    BoundingBox, GeometryError, MultiPolygon, Point, Polygon, Ring, Segment,
};
pub use routekit_settings::{Config, OrderingSettings, PathFindingSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging with the given output format
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init(),
    }
    .context("Failed to install tracing subscriber")
}

/// Builds a travel planner from a config file
///
/// A missing file means default settings.
pub fn planner_from_config(
    config_path: &Path,
    keep_in: Option<&MultiPolygon>,
    keep_out: &MultiPolygon,
) -> anyhow::Result<TravelPlanner> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    TravelPlanner::new(keep_in, keep_out, config.travel_parameters())
        .context("Failed to build travel planner")
}
