use super::surface::{PathFindingSurface, RingIndices};
use super::visibility::VisibilityCache;
use routekit_core::Point;

/// Candidate next hops from one point of the search.
///
/// Yields the goal first, then the raw vertices of every active ring in
/// vertex-table order. A candidate is skipped when it is `current` or the
/// start, when the path limiter rejects it, or when the segment from
/// `current` leaves the surface. The limiter runs before the visibility test
/// and sees the candidate with its tentative path length.
///
/// Consuming; build a new one for every expansion.
pub struct Neighbors<'a> {
    surface: &'a PathFindingSurface,
    start: Point,
    goal: Point,
    current: Point,
    ring_indices: &'a RingIndices,
    g_score_current: f64,
    path_limiter: &'a dyn Fn(Point, f64) -> bool,
    cache: &'a mut VisibilityCache,
    rows: Vec<usize>,
    row: usize,
    column: usize,
    goal_done: bool,
    rejected: usize,
}

impl<'a> Neighbors<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        surface: &'a PathFindingSurface,
        start: Point,
        goal: Point,
        current: Point,
        ring_indices: &'a RingIndices,
        g_score_current: f64,
        path_limiter: &'a dyn Fn(Point, f64) -> bool,
        cache: &'a mut VisibilityCache,
    ) -> Self {
        let rows = surface.active_vertex_rows(ring_indices);
        Self {
            surface,
            start,
            goal,
            current,
            ring_indices,
            g_score_current,
            path_limiter,
            cache,
            rows,
            row: 0,
            column: 0,
            goal_done: false,
            rejected: 0,
        }
    }

    /// How many candidates the path limiter has turned down so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    fn next_candidate(&mut self) -> Option<Point> {
        if !self.goal_done {
            self.goal_done = true;
            return Some(self.goal);
        }
        let table = self.surface.vertices();
        while let Some(&row) = self.rows.get(self.row) {
            if let Some(&p) = table.get(row).and_then(|r| r.get(self.column)) {
                self.column += 1;
                return Some(p);
            }
            self.row += 1;
            self.column = 0;
        }
        None
    }

    fn accept(&mut self, candidate: Point) -> Option<(Point, f64)> {
        if candidate == self.current || candidate == self.start {
            return None;
        }
        let g = self.g_score_current + self.current.distance_to(&candidate);
        if !(self.path_limiter)(candidate, g) {
            self.rejected += 1;
            return None;
        }
        self.surface
            .segment_in_surface(&self.current, &candidate, self.ring_indices, self.cache)
            .then_some((candidate, g))
    }
}

impl Iterator for Neighbors<'_> {
    /// A visible candidate and its tentative path length.
    type Item = (Point, f64);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(candidate) = self.next_candidate() {
            if let Some(hit) = self.accept(candidate) {
                return Some(hit);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routekit_core::{MultiPolygon, Polygon};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn board() -> PathFindingSurface {
        let keep_in: MultiPolygon = vec![Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0))].into();
        let keep_out: MultiPolygon = vec![Polygon::rectangle(p(0.4, 0.4), p(0.6, 0.6))].into();
        PathFindingSurface::new(Some(&keep_in), &keep_out, 0.001)
    }

    #[test]
    fn test_goal_first_then_visible_vertices() {
        let surface = board();
        let start = p(0.2, 0.2);
        let goal = p(0.3, 0.2);
        let indices = surface.in_surface(&start).unwrap();
        let mut cache = VisibilityCache::new();
        let unlimited = |_: Point, _: f64| true;

        let found: Vec<Point> = surface
            .neighbors(start, goal, &indices, 0.0, &unlimited, start, &mut cache)
            .map(|(point, _)| point)
            .collect();

        assert_eq!(found[0], goal);
        // Board corners plus the two near obstacle corners and the two far
        // ones that are seen past the obstacle edges.
        assert!(found.contains(&p(0.0, 0.0)));
        assert!(found.contains(&p(0.4, 0.4)));
        assert!(found.contains(&p(0.6, 0.4)));
        assert!(found.contains(&p(0.4, 0.6)));
        // Behind the obstacle.
        assert!(!found.contains(&p(0.6, 0.6)));
    }

    #[test]
    fn test_scores_accumulate() {
        let surface = board();
        let start = p(0.0, 0.5);
        let current = p(0.4, 0.4);
        let indices = surface.in_surface(&start).unwrap();
        let mut cache = VisibilityCache::new();
        let unlimited = |_: Point, _: f64| true;

        let (first, g) = surface
            .neighbors(start, p(1.0, 0.5), &indices, 2.0, &unlimited, current, &mut cache)
            .next()
            .unwrap();
        // Goal is hidden behind the obstacle from (0.4, 0.4), so the first
        // hit is a board corner.
        assert!([p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)].contains(&first));
        assert!((g - (2.0 + current.distance_to(&first))).abs() < 1e-12);
    }

    #[test]
    fn test_limiter_rejections_are_counted() {
        let surface = board();
        let start = p(0.2, 0.2);
        let indices = surface.in_surface(&start).unwrap();
        let mut cache = VisibilityCache::new();
        let reject_all = |_: Point, _: f64| false;

        let mut neighbors =
            surface.neighbors(start, p(0.3, 0.3), &indices, 0.0, &reject_all, start, &mut cache);
        assert!(neighbors.by_ref().next().is_none());
        // Goal plus every vertex.
        let vertices: usize = surface.vertices().iter().map(Vec::len).sum();
        assert_eq!(neighbors.rejected(), 1 + vertices);
        drop(neighbors);
        // Nothing reached the visibility test.
        assert!(cache.is_empty());
    }
}
