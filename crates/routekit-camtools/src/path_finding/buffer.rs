//! Tolerance buffering of rings.
//!
//! Rings are offset one at a time with `cavalier_contours`. The offset may
//! split a ring into several pieces or remove it entirely; arcs produced at
//! convex corners are flattened back into straight segments.

use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use routekit_core::{BoundingBox, Point, Ring};
use std::panic;
use tracing::warn;

/// Arc flattening error as a fraction of the offset distance.
const ARC_ERROR_FRACTION: f64 = 0.01;

/// Which way the area enclosed by a ring should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferDirection {
    /// Enclosed area gets larger.
    Grow,
    /// Enclosed area gets smaller; small rings may vanish.
    Shrink,
}

/// One closed piece of a buffered ring.
#[derive(Debug, Clone)]
pub struct RingPiece {
    /// Closed point list (first point repeated at the end).
    pub points: Vec<Point>,
    pub bbox: BoundingBox,
}

impl RingPiece {
    fn new(mut points: Vec<Point>) -> Self {
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        let bbox = BoundingBox::from_points(&points);
        Self { points, bbox }
    }
}

/// Offsets `ring` by `distance` in `direction`.
///
/// Returns an empty list when the ring vanishes. With a non-positive distance
/// the ring is returned unchanged.
pub fn buffer_ring(ring: &Ring, direction: BufferDirection, distance: f64) -> Vec<RingPiece> {
    let mut vertices: Vec<Point> = Vec::with_capacity(ring.len());
    for p in ring.vertices() {
        if vertices.last() != Some(p) {
            vertices.push(*p);
        }
    }
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    if vertices.len() < 3 {
        return Vec::new();
    }
    if Ring::new(vertices.clone()).signed_area() < 0.0 {
        vertices.reverse();
    }

    if distance <= 0.0 {
        return vec![RingPiece::new(vertices)];
    }

    let mut pline = Polyline::new();
    for p in &vertices {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(true);

    // Counter-clockwise input: positive offsets move left, i.e. inwards.
    let offset = match direction {
        BufferDirection::Grow => -distance,
        BufferDirection::Shrink => distance,
    };

    match panic::catch_unwind(panic::AssertUnwindSafe(|| pline.parallel_offset(offset))) {
        Ok(offsets) => offsets
            .iter()
            .filter_map(|offset_pline| flatten(offset_pline, distance * ARC_ERROR_FRACTION))
            .collect(),
        Err(_) => {
            warn!(
                vertices = vertices.len(),
                "Panic during parallel offset of ring, using it unbuffered"
            );
            vec![RingPiece::new(vertices)]
        }
    }
}

fn flatten(pline: &Polyline<f64>, error_distance: f64) -> Option<RingPiece> {
    let lines = pline.arcs_to_approx_lines(error_distance);
    let source = lines.as_ref().unwrap_or(pline);

    let mut points: Vec<Point> = Vec::with_capacity(source.vertex_count());
    for v in source.iter_vertexes() {
        let p = Point::new(v.x, v.y);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return None;
    }
    Some(RingPiece::new(points))
}
