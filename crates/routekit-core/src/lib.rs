//! # routekit Core
//!
//! Core types and utilities for routekit.
//! Provides the planar geometry data model shared by the path finding and
//! route ordering crates, along with the error types used to validate
//! geometry before it reaches the planner.

pub mod error;
pub mod geometry;

pub use error::GeometryError;

pub use geometry::{BoundingBox, MultiPolygon, Point, Polygon, Ring, Segment};
