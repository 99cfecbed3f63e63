//! A* search over the visibility graph of a [`PathFindingSurface`].

use super::surface::PathFindingSurface;
use super::visibility::{PointKey, VisibilityCache};
use routekit_core::Point;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, trace};

/// How a search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Polyline from start to goal, both included.
    Found(Vec<Point>),
    /// Start and goal are not connected inside the surface.
    Unreachable,
    /// Every remaining route was cut off by the path limiter.
    Abandoned,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_path(self) -> Option<Vec<Point>> {
        match self {
            Self::Found(path) => Some(path),
            Self::Unreachable | Self::Abandoned => None,
        }
    }
}

/// Path limiter that accepts every candidate.
pub fn unlimited(_: Point, _: f64) -> bool {
    true
}

struct OpenEntry {
    f: f64,
    g: f64,
    sequence: u64,
    point: Point,
    parent: Option<(PointKey, Point)>,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    // Min-heap on f; among equal f the earlier insertion pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PathFindingSurface {
    /// Shortest polyline from `start` to `goal` whose waypoints are polygon
    /// vertices, or `None` when there is none or the limiter forbids it.
    ///
    /// `path_limiter` is asked about every candidate with the length the path
    /// would have on reaching it; returning `false` drops the candidate.
    pub fn find_path<F>(&self, start: Point, goal: Point, path_limiter: F) -> Option<Vec<Point>>
    where
        F: Fn(Point, f64) -> bool,
    {
        let mut cache = VisibilityCache::new();
        self.search(start, goal, &path_limiter, &mut cache)
            .into_path()
    }

    /// [`PathFindingSurface::find_path`] with a visibility cache that outlives
    /// the query.
    pub fn find_path_with_cache<F>(
        &self,
        start: Point,
        goal: Point,
        path_limiter: F,
        cache: &mut VisibilityCache,
    ) -> Option<Vec<Point>>
    where
        F: Fn(Point, f64) -> bool,
    {
        self.search(start, goal, &path_limiter, cache).into_path()
    }

    /// Runs the search and reports why it stopped.
    pub fn search(
        &self,
        start: Point,
        goal: Point,
        path_limiter: &dyn Fn(Point, f64) -> bool,
        cache: &mut VisibilityCache,
    ) -> SearchOutcome {
        let Some(ring_indices) = self.in_surface(&start) else {
            debug!(?start, "Start is outside the surface");
            return SearchOutcome::Unreachable;
        };
        match self.in_surface(&goal) {
            Some(goal_indices) if goal_indices == ring_indices => {}
            Some(_) => {
                debug!(?start, ?goal, "Start and goal are in different parts of the surface");
                return SearchOutcome::Unreachable;
            }
            None => {
                debug!(?goal, "Goal is outside the surface");
                return SearchOutcome::Unreachable;
            }
        }
        if start == goal {
            return SearchOutcome::Found(vec![start, goal]);
        }

        let goal_key = PointKey::from(&goal);
        let mut open = BinaryHeap::new();
        let mut sequence = 0u64;
        let mut best_g: HashMap<PointKey, f64> = HashMap::new();
        // Node -> (predecessor key, predecessor point).
        let mut came_from: HashMap<PointKey, (PointKey, Point)> = HashMap::new();
        let mut closed: HashSet<PointKey> = HashSet::new();
        let mut rejected = 0usize;
        let mut expanded = 0usize;

        open.push(OpenEntry {
            f: start.distance_to(&goal),
            g: 0.0,
            sequence,
            point: start,
            parent: None,
        });
        best_g.insert(PointKey::from(&start), 0.0);

        while let Some(OpenEntry {
            g, point, parent, ..
        }) = open.pop()
        {
            let key = PointKey::from(&point);
            if !closed.insert(key) {
                continue;
            }
            if let Some(parent) = parent {
                came_from.insert(key, parent);
            }

            if key == goal_key {
                let path = rebuild_path(&came_from, goal);
                debug!(
                    waypoints = path.len(),
                    length = g,
                    expanded,
                    "Found path"
                );
                return SearchOutcome::Found(path);
            }

            expanded += 1;
            trace!(?point, g, "Expanding");

            let mut neighbors =
                self.neighbors(start, goal, &ring_indices, g, path_limiter, point, cache);
            for (next, next_g) in neighbors.by_ref() {
                let next_key = PointKey::from(&next);
                // The goal comes first, so a straight move from start is
                // settled before any vertex is tested.
                if parent.is_none() && next_key == goal_key {
                    debug!(length = next_g, "Goal visible from start");
                    return SearchOutcome::Found(vec![start, goal]);
                }
                if closed.contains(&next_key) {
                    continue;
                }
                if next_g < best_g.get(&next_key).copied().unwrap_or(f64::INFINITY) {
                    best_g.insert(next_key, next_g);
                    sequence += 1;
                    open.push(OpenEntry {
                        f: next_g + next.distance_to(&goal),
                        g: next_g,
                        sequence,
                        point: next,
                        parent: Some((key, point)),
                    });
                }
            }
            rejected += neighbors.rejected();
        }

        if rejected > 0 {
            debug!(?start, ?goal, rejected, expanded, "Search abandoned by path limiter");
            SearchOutcome::Abandoned
        } else {
            debug!(?start, ?goal, expanded, "No path");
            SearchOutcome::Unreachable
        }
    }
}

fn rebuild_path(came_from: &HashMap<PointKey, (PointKey, Point)>, goal: Point) -> Vec<Point> {
    let mut path = vec![goal];
    let mut current = PointKey::from(&goal);
    while let Some(&(parent, point)) = came_from.get(&current) {
        path.push(point);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use routekit_core::{MultiPolygon, Polygon};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_open_entry_ordering() {
        let entry = |f: f64, sequence: u64| OpenEntry {
            f,
            g: 0.0,
            sequence,
            point: p(0.0, 0.0),
            parent: None,
        };
        let mut heap = BinaryHeap::new();
        heap.push(entry(2.0, 0));
        heap.push(entry(1.0, 2));
        heap.push(entry(1.0, 1));
        assert_eq!(heap.pop().map(|e| e.sequence), Some(1));
        assert_eq!(heap.pop().map(|e| e.sequence), Some(2));
        assert_eq!(heap.pop().map(|e| e.sequence), Some(0));
    }

    #[test]
    fn test_open_plane_is_direct() {
        let surface = PathFindingSurface::new(None, &MultiPolygon::new(), 0.1);
        let path = surface.find_path(p(0.0, 0.0), p(5.0, 3.0), unlimited);
        assert_eq!(path, Some(vec![p(0.0, 0.0), p(5.0, 3.0)]));
    }

    #[test]
    fn test_visible_goal_skips_vertex_tests() {
        let keep_in: MultiPolygon = vec![Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0))].into();
        let keep_out: MultiPolygon = vec![Polygon::rectangle(p(0.4, 0.4), p(0.6, 0.6))].into();
        let surface = PathFindingSurface::new(Some(&keep_in), &keep_out, 0.001);
        let mut cache = VisibilityCache::new();

        let outcome = surface.search(p(0.1, 0.1), p(0.9, 0.2), &unlimited, &mut cache);
        assert_eq!(outcome, SearchOutcome::Found(vec![p(0.1, 0.1), p(0.9, 0.2)]));
        // Only the start-goal segment was tested.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_start_equals_goal() {
        let surface = PathFindingSurface::new(None, &MultiPolygon::new(), 0.1);
        let outcome = surface.search(p(1.0, 1.0), p(1.0, 1.0), &unlimited, &mut VisibilityCache::new());
        assert_eq!(outcome, SearchOutcome::Found(vec![p(1.0, 1.0), p(1.0, 1.0)]));
    }

    #[test]
    fn test_start_outside_keep_in() {
        let keep_in: MultiPolygon = vec![Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0))].into();
        let surface = PathFindingSurface::new(Some(&keep_in), &MultiPolygon::new(), 0.01);
        let outcome = surface.search(p(2.0, 2.0), p(0.5, 0.5), &unlimited, &mut VisibilityCache::new());
        assert_eq!(outcome, SearchOutcome::Unreachable);
        assert!(!outcome.is_found());
    }

    #[test]
    fn test_different_keep_in_islands() {
        let keep_in: MultiPolygon = vec![
            Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0)),
            Polygon::rectangle(p(2.0, 0.0), p(3.0, 1.0)),
        ]
        .into();
        let surface = PathFindingSurface::new(Some(&keep_in), &MultiPolygon::new(), 0.01);
        assert_eq!(surface.find_path(p(0.5, 0.5), p(2.5, 0.5), unlimited), None);
    }
}
