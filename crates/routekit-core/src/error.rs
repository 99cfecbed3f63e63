//! Error handling for routekit
//!
//! Geometry errors raised when rings and polygons are rejected during
//! validation. Error types use `thiserror`.

use thiserror::Error;

/// Geometry error type
///
/// Raised when raw input geometry is validated before it is handed to the
/// planner. The planner itself never validates; it treats well-formed
/// geometry as a precondition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A ring has fewer distinct vertices than a polygon needs
    #[error("Ring has {count} distinct vertices, at least 3 are required")]
    TooFewVertices {
        /// The number of distinct vertices found.
        count: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate at vertex {index}: ({x}, {y})")]
    NonFiniteCoordinate {
        /// Index of the offending vertex in the input.
        index: usize,
        /// The x coordinate.
        x: f64,
        /// The y coordinate.
        y: f64,
    },

    /// A ring encloses no area
    #[error("Ring encloses zero area")]
    ZeroArea,

    /// A polygon hole failed validation
    #[error("Hole {index} is invalid: {source}")]
    InvalidHole {
        /// Index of the hole in the polygon.
        index: usize,
        /// The underlying ring error.
        #[source]
        source: Box<GeometryError>,
    },
}
