//! Planar geometry data model.
//!
//! All coordinates are `f64` and all polygons are straight-edged. Rings are
//! stored closed (first point repeated at the end).

mod bounding_box;
mod point;
mod polygon;

pub use bounding_box::BoundingBox;
pub use point::{Point, Segment};
pub use polygon::{MultiPolygon, Polygon, Ring};
