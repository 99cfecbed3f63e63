//! Obstacle-avoiding travel paths.
//!
//! A [`PathFindingSurface`] is built once from a keep-in region, a keep-out
//! region and a tolerance, then queried for many start/goal pairs. Paths only
//! turn at polygon vertices and never leave the surface.
//!
//! ```
//! use routekit_camtools::path_finding::{unlimited, PathFindingSurface};
//! use routekit_core::{MultiPolygon, Point, Polygon};
//!
//! let keep_in: MultiPolygon =
//!     vec![Polygon::rectangle(Point::new(0.0, 0.0), Point::new(1.0, 1.0))].into();
//! let keep_out: MultiPolygon =
//!     vec![Polygon::rectangle(Point::new(0.4, 0.4), Point::new(0.6, 0.6))].into();
//!
//! let surface = PathFindingSurface::new(Some(&keep_in), &keep_out, 0.001);
//! let path = surface
//!     .find_path(Point::new(0.0, 0.5), Point::new(1.0, 0.5), unlimited)
//!     .unwrap();
//! assert_eq!(path.len(), 4);
//! ```

mod buffer;
mod neighbors;
pub mod predicates;
mod region;
mod search;
mod surface;
mod visibility;

pub use buffer::{buffer_ring, BufferDirection, RingPiece};
pub use neighbors::Neighbors;
pub use search::{unlimited, SearchOutcome};
pub use surface::{PathFindingSurface, RingIndices};
pub use visibility::{PointKey, VisibilityCache};
