//! Travel planning - linking cuts with obstacle-avoiding rapid moves
//!
//! Sub-paths are ordered with [`crate::tsp`] and every move between two of
//! them is routed through a [`PathFindingSurface`]. A move whose route would
//! be longer than the detour limits allow, or that has no route at all,
//! becomes a retract: lift to safe height, move straight, plunge.

use crate::error::{CamToolResult, ParameterError, ParameterResult};
use crate::path_finding::{PathFindingSurface, VisibilityCache};
use crate::tsp::{reorder, OrderingStrategy, Visitable};
use routekit_core::{MultiPolygon, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for [`TravelPlanner`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelParameters {
    /// Clearance kept from every region boundary.
    pub tolerance: f64,
    /// Longest accepted route as a percentage of the straight distance.
    pub max_detour_percent: f64,
    /// Longest accepted extra length over the straight distance.
    /// Zero disables this limit.
    pub max_detour_absolute: f64,
    pub ordering: OrderingStrategy,
    pub quantization: f64,
}

impl Default for TravelParameters {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_detour_percent: 200.0,
            max_detour_absolute: 0.0,
            ordering: OrderingStrategy::TwoOpt,
            quantization: 0.0,
        }
    }
}

impl TravelParameters {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_detour_percent(mut self, percent: f64) -> Self {
        self.max_detour_percent = percent;
        self
    }

    pub fn with_max_detour_absolute(mut self, distance: f64) -> Self {
        self.max_detour_absolute = distance;
        self
    }

    pub fn with_ordering(mut self, ordering: OrderingStrategy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn validate(&self) -> ParameterResult<()> {
        // Raw waypoints need clearance from the checked boundaries.
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "tolerance".to_string(),
                reason: format!("must be positive, got {}", self.tolerance),
            });
        }
        non_negative("max_detour_absolute", self.max_detour_absolute)?;
        non_negative("quantization", self.quantization)?;
        if !self.max_detour_percent.is_finite() || self.max_detour_percent < 100.0 {
            return Err(ParameterError::InvalidValue {
                name: "max_detour_percent".to_string(),
                reason: format!("must be at least 100, got {}", self.max_detour_percent),
            });
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> ParameterResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min: 0.0,
            max: f64::INFINITY,
        })
    }
}

/// One rapid move between two cuts.
#[derive(Debug, Clone, PartialEq)]
pub enum TravelMove {
    /// Stay at travel height and follow the polyline, endpoints included.
    Direct(Vec<Point>),
    /// Lift clear of the work and move straight across.
    Retract { from: Point, to: Point },
}

impl TravelMove {
    pub fn is_retract(&self) -> bool {
        matches!(self, Self::Retract { .. })
    }

    /// Horizontal distance covered.
    pub fn length(&self) -> f64 {
        match self {
            Self::Direct(points) => points.windows(2).map(|w| w[0].distance_to(&w[1])).sum(),
            Self::Retract { from, to } => from.distance_to(to),
        }
    }
}

/// Ordered cuts with the moves leading into each of them.
#[derive(Debug, Clone)]
pub struct TravelPlan<T> {
    pub items: Vec<T>,
    /// `moves[i]` ends at the anchor of `items[i]`.
    pub moves: Vec<TravelMove>,
    pub travel_length: f64,
    pub retracts: usize,
}

/// Plans the non-cutting moves of a job over one keep-in/keep-out pair.
#[derive(Debug, Clone)]
pub struct TravelPlanner {
    surface: PathFindingSurface,
    params: TravelParameters,
}

impl TravelPlanner {
    /// Validates the parameters and input geometry, then builds the surface.
    pub fn new(
        keep_in: Option<&MultiPolygon>,
        keep_out: &MultiPolygon,
        params: TravelParameters,
    ) -> CamToolResult<Self> {
        params.validate()?;
        for polygon in keep_in.into_iter().flatten().chain(keep_out) {
            polygon.validate()?;
        }

        let surface = PathFindingSurface::new(keep_in, keep_out, params.tolerance);
        Ok(Self { surface, params })
    }

    pub fn surface(&self) -> &PathFindingSurface {
        &self.surface
    }

    pub fn params(&self) -> &TravelParameters {
        &self.params
    }

    /// Path limiter for a move whose straight length is `direct`.
    pub fn path_limiter(&self, direct: f64) -> impl Fn(Point, f64) -> bool {
        let mut limit = direct * self.params.max_detour_percent / 100.0;
        if self.params.max_detour_absolute > 0.0 {
            limit = limit.min(direct + self.params.max_detour_absolute);
        }
        move |_, length| length <= limit
    }

    /// Routes a single move.
    pub fn travel(&self, from: Point, to: Point) -> TravelMove {
        self.travel_with_cache(from, to, &mut VisibilityCache::new())
    }

    fn travel_with_cache(&self, from: Point, to: Point, cache: &mut VisibilityCache) -> TravelMove {
        let limiter = self.path_limiter(from.distance_to(&to));
        match self.surface.find_path_with_cache(from, to, limiter, cache) {
            Some(path) => TravelMove::Direct(path),
            None => TravelMove::Retract { from, to },
        }
    }

    /// Orders `items` from `start` and routes a move into each one.
    ///
    /// The tool is assumed to leave every item where it entered it, at the
    /// item's anchor.
    pub fn plan<T: Visitable>(&self, items: Vec<T>, start: Point) -> TravelPlan<T> {
        let items = reorder(items, start, self.params.quantization, self.params.ordering);
        let mut cache = VisibilityCache::new();
        let mut moves = Vec::with_capacity(items.len());
        let mut current = start;

        for item in &items {
            let anchor = item.anchor();
            moves.push(self.travel_with_cache(current, anchor, &mut cache));
            current = anchor;
        }

        let travel_length = moves.iter().map(TravelMove::length).sum();
        let retracts = moves.iter().filter(|m| m.is_retract()).count();
        let (hits, misses) = cache.stats();
        debug!(
            items = items.len(),
            travel_length,
            retracts,
            cache_hits = hits,
            cache_misses = misses,
            "Planned travel"
        );

        TravelPlan {
            items,
            moves,
            travel_length,
            retracts,
        }
    }
}
