//! The tolerance-buffered surface that travel moves are planned on.

use super::buffer::{buffer_ring, BufferDirection, RingPiece};
use super::neighbors::Neighbors;
use super::predicates::{point_in_ring, segments_intersect};
use super::region::Region;
use super::visibility::VisibilityCache;
use routekit_core::{BoundingBox, MultiPolygon, Point, Polygon, Ring};
use tracing::debug;

/// Distance, as a fraction of the tolerance, within which a merged vertex is
/// taken to be the input vertex it came from.
const SNAP_FRACTION: f64 = 1e-3;

/// All retained pieces of one buffered ring plus their combined box.
#[derive(Debug, Clone)]
pub(crate) struct BufferedRing {
    pieces: Vec<RingPiece>,
    bbox: BoundingBox,
    /// Row of this ring in the vertex table.
    vertex_row: usize,
}

impl BufferedRing {
    /// True if `p` is inside any piece.
    fn contains(&self, p: &Point) -> bool {
        self.bbox.covers(p)
            && self
                .pieces
                .iter()
                .any(|piece| point_in_ring(p, &piece.points, &piece.bbox))
    }

    /// True if segment `a-b` touches any edge of any piece.
    fn crosses(&self, a: &Point, b: &Point, segment_box: &BoundingBox) -> bool {
        if !self.bbox.intersects(segment_box) {
            return false;
        }
        self.pieces.iter().any(|piece| {
            piece.bbox.intersects(segment_box)
                && piece
                    .points
                    .windows(2)
                    .any(|edge| segments_intersect(a, b, &edge[0], &edge[1]))
        })
    }
}

/// One input polygon after buffering: its outer ring and retained holes.
#[derive(Debug, Clone)]
pub(crate) struct BufferedPolygon {
    outer: BufferedRing,
    holes: Vec<BufferedRing>,
}

/// Which buffered rings matter around a point.
///
/// Every entry is `(polygon index, hole indices)`. With a keep-in, the
/// polygons are the pieces of keep-in minus keep-out: the piece contains the
/// point and every retained hole is listed, since each is an obstacle there.
/// Without a keep-in, the polygons are the merged obstacles: an empty hole
/// list means the point is outside the obstacle and its outer ring is active,
/// a non-empty list means the point sits in those holes of the obstacle and
/// only they are active.
///
/// Points in the same connected part of the surface have equal indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RingIndices {
    pub keep_in: Vec<(usize, Vec<usize>)>,
    pub keep_out: Vec<(usize, Vec<usize>)>,
}

impl RingIndices {
    /// True when no tracked ring encloses or bounds the point.
    pub fn is_empty(&self) -> bool {
        self.keep_in.is_empty() && self.keep_out.is_empty()
    }
}

/// Keep-in minus keep-out, buffered by a tolerance, ready for repeated
/// path queries.
///
/// The members of each region are merged first, so touching or overlapping
/// polygons act as one shape and a keep-out flush with the keep-in edge
/// leaves no gap. The merged area is then grown by the tolerance, while the
/// waypoints offered to the search are its raw vertices. Waypoints therefore
/// sit a tolerance away from every boundary that is checked, so a path may
/// run along an obstacle edge without touching it.
///
/// The surface is immutable once built and can be shared between threads;
/// each query brings its own [`VisibilityCache`].
#[derive(Debug, Clone)]
pub struct PathFindingSurface {
    keep_in: Option<Vec<BufferedPolygon>>,
    keep_out: Vec<BufferedPolygon>,
    /// One row per retained ring: raw vertices, keep-in polygons first, outer
    /// before holes.
    all_vertices: Vec<Vec<Point>>,
    tolerance: f64,
}

impl PathFindingSurface {
    /// Builds the surface. `None` keep-in means the whole plane is allowed.
    ///
    /// Construction never fails; degenerate rings are dropped.
    pub fn new(keep_in: Option<&MultiPolygon>, keep_out: &MultiPolygon, tolerance: f64) -> Self {
        let mut all_vertices = Vec::new();
        let mut buffer_all = |polygons: &[Polygon], direction: BufferDirection| {
            polygons
                .iter()
                .filter_map(|polygon| {
                    buffer_polygon(polygon, direction, tolerance, &mut all_vertices)
                })
                .collect::<Vec<_>>()
        };

        let (keep_in, keep_out) = match Region::merge(keep_in, keep_out, tolerance * SNAP_FRACTION)
        {
            Region::Bounded(area) => (Some(buffer_all(&area, BufferDirection::Grow)), Vec::new()),
            Region::Unbounded(obstacles) => (None, buffer_all(&obstacles, BufferDirection::Shrink)),
        };

        debug!(
            keep_in = keep_in.as_ref().map(|k| k.len()),
            keep_out = keep_out.len(),
            rings = all_vertices.len(),
            vertices = all_vertices.iter().map(Vec::len).sum::<usize>(),
            tolerance,
            "Built path finding surface"
        );

        Self {
            keep_in,
            keep_out,
            all_vertices,
            tolerance,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The waypoint universe, one row per retained ring.
    pub fn vertices(&self) -> &[Vec<Point>] {
        &self.all_vertices
    }

    /// Locates `p` in the surface.
    ///
    /// Returns `None` when `p` is outside every keep-in polygon, inside one of
    /// their holes, or inside a keep-out obstacle.
    pub fn in_surface(&self, p: &Point) -> Option<RingIndices> {
        let mut indices = RingIndices::default();

        if let Some(keep_in) = &self.keep_in {
            for (i, polygon) in keep_in.iter().enumerate() {
                if !polygon.outer.contains(p) || polygon.holes.iter().any(|h| h.contains(p)) {
                    continue;
                }
                indices.keep_in.push((i, (0..polygon.holes.len()).collect()));
            }
            if indices.keep_in.is_empty() {
                return None;
            }
        }

        for (i, polygon) in self.keep_out.iter().enumerate() {
            if !polygon.outer.contains(p) {
                indices.keep_out.push((i, Vec::new()));
                continue;
            }
            let holes: Vec<usize> = polygon
                .holes
                .iter()
                .enumerate()
                .filter(|(_, hole)| hole.contains(p))
                .map(|(j, _)| j)
                .collect();
            if holes.is_empty() {
                return None;
            }
            indices.keep_out.push((i, holes));
        }

        Some(indices)
    }

    /// True if the straight segment `a-b` stays inside the surface, given the
    /// ring indices of `a`.
    ///
    /// Results are memoised in `cache` under the unordered pair.
    pub fn segment_in_surface(
        &self,
        a: &Point,
        b: &Point,
        ring_indices: &RingIndices,
        cache: &mut VisibilityCache,
    ) -> bool {
        if let Some(visible) = cache.get(a, b) {
            return visible;
        }

        let segment_box = BoundingBox::from_segment(a, b);
        let visible = !self
            .active_rings(ring_indices)
            .any(|ring| ring.crosses(a, b, &segment_box));

        cache.insert(a, b, visible);
        visible
    }

    /// Candidate next hops from `current`; see [`Neighbors`].
    #[allow(clippy::too_many_arguments)]
    pub fn neighbors<'a>(
        &'a self,
        start: Point,
        goal: Point,
        ring_indices: &'a RingIndices,
        g_score_current: f64,
        path_limiter: &'a dyn Fn(Point, f64) -> bool,
        current: Point,
        cache: &'a mut VisibilityCache,
    ) -> Neighbors<'a> {
        Neighbors::new(
            self,
            start,
            goal,
            current,
            ring_indices,
            g_score_current,
            path_limiter,
            cache,
        )
    }

    /// Buffered rings selected by `ring_indices`, keep-in before keep-out.
    pub(crate) fn active_rings<'a>(
        &'a self,
        ring_indices: &'a RingIndices,
    ) -> impl Iterator<Item = &'a BufferedRing> + 'a {
        let keep_in = self.keep_in.as_deref().unwrap_or(&[]);
        let inside = ring_indices
            .keep_in
            .iter()
            .filter_map(move |(i, holes)| keep_in.get(*i).map(|polygon| (polygon, holes)))
            .flat_map(move |(polygon, holes)| {
                std::iter::once(&polygon.outer)
                    .chain(holes.iter().filter_map(move |j| polygon.holes.get(*j)))
            });
        let outside = ring_indices
            .keep_out
            .iter()
            .filter_map(move |(i, holes)| self.keep_out.get(*i).map(|polygon| (polygon, holes)))
            .flat_map(move |(polygon, holes)| {
                let outer = holes.is_empty().then_some(&polygon.outer);
                outer
                    .into_iter()
                    .chain(holes.iter().filter_map(move |j| polygon.holes.get(*j)))
            });
        inside.chain(outside)
    }

    /// Vertex-table rows of the rings selected by `ring_indices`.
    pub(crate) fn active_vertex_rows(&self, ring_indices: &RingIndices) -> Vec<usize> {
        self.active_rings(ring_indices)
            .map(|ring| ring.vertex_row)
            .collect()
    }
}

/// Buffers one polygon. The outer moves in `direction`, the holes the other
/// way. Returns `None` if the outer vanishes.
fn buffer_polygon(
    polygon: &Polygon,
    direction: BufferDirection,
    tolerance: f64,
    all_vertices: &mut Vec<Vec<Point>>,
) -> Option<BufferedPolygon> {
    let hole_direction = match direction {
        BufferDirection::Grow => BufferDirection::Shrink,
        BufferDirection::Shrink => BufferDirection::Grow,
    };

    let outer = buffer_one(&polygon.outer, direction, tolerance, all_vertices)?;
    let holes = polygon
        .inners
        .iter()
        .filter_map(|hole| buffer_one(hole, hole_direction, tolerance, all_vertices))
        .collect();
    Some(BufferedPolygon { outer, holes })
}

fn buffer_one(
    ring: &Ring,
    direction: BufferDirection,
    tolerance: f64,
    all_vertices: &mut Vec<Vec<Point>>,
) -> Option<BufferedRing> {
    let pieces = buffer_ring(ring, direction, tolerance);
    if pieces.is_empty() {
        return None;
    }
    let mut bbox = BoundingBox::empty();
    for piece in &pieces {
        bbox.merge(&piece.bbox);
    }
    all_vertices.push(ring.vertices().to_vec());
    Some(BufferedRing {
        pieces,
        bbox,
        vertex_row: all_vertices.len() - 1,
    })
}
