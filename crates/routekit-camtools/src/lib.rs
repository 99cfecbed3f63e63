//! # routekit CAM Tools
//!
//! Motion planning for the non-cutting parts of a CNC job.
//!
//! ## Tools Included
//!
//! - **Path Finding**: Shortest travel paths that stay inside a keep-in region
//!   and out of a keep-out region, with a clearance tolerance
//! - **Route Ordering**: Nearest neighbour and 2-opt ordering of sub-paths,
//!   drill points and slots
//! - **Travel Planner**: Orders a job and links its cuts with routed moves,
//!   falling back to retracts
//!
//! ## Supporting Infrastructure
//!
//! - **Predicates**: Exact orientation, segment intersection and containment
//! - **Errors**: Parameter and geometry validation errors

pub mod error;
pub mod path_finding;
pub mod travel;
pub mod tsp;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use path_finding::{
    unlimited, PathFindingSurface, RingIndices, SearchOutcome, VisibilityCache,
};
pub use travel::{TravelMove, TravelParameters, TravelPlan, TravelPlanner};
pub use tsp::{nearest_neighbour, reorder, tour_length, tsp_2opt, OrderingStrategy, Visitable};
