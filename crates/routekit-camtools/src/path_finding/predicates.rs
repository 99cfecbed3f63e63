//! Exact geometric predicates.
//!
//! None of these apply an epsilon: callers branch on the exact sign of
//! [`orientation`], and the tolerance of the planner is carried entirely by
//! the buffered geometry instead.

use routekit_core::{BoundingBox, Point};

/// Cross product of `p0->p1` and `p0->p2`.
///
/// Positive when `p2` is left of the directed line through `p0` and `p1`,
/// negative when it is right, zero when the three points are collinear.
pub fn orientation(p0: &Point, p1: &Point, p2: &Point) -> f64 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y)
}

/// True if `x` lies on the closed interval between `a` and `b`, in either
/// order.
pub fn is_between(a: f64, x: f64, b: f64) -> bool {
    x == a || x == b || (a - x > 0.0) == (x - b > 0.0)
}

/// True if `p` is collinear with `a`/`b` and between them on both axes.
fn on_segment(a: &Point, p: &Point, b: &Point) -> bool {
    is_between(a.x, p.x, b.x) && is_between(a.y, p.y, b.y)
}

/// True if the closed segments `p0-p1` and `p2-p3` share at least one point.
///
/// Endpoint contact and collinear overlap both count as intersecting.
pub fn segments_intersect(p0: &Point, p1: &Point, p2: &Point, p3: &Point) -> bool {
    let left012 = orientation(p0, p1, p2);
    let left013 = orientation(p0, p1, p3);
    let left230 = orientation(p2, p3, p0);
    let left231 = orientation(p2, p3, p1);

    if p0 != p1 {
        if left012 == 0.0 && on_segment(p0, p2, p1) {
            return true;
        }
        if left013 == 0.0 && on_segment(p0, p3, p1) {
            return true;
        }
    }
    if p2 != p3 {
        if left230 == 0.0 && on_segment(p2, p0, p3) {
            return true;
        }
        if left231 == 0.0 && on_segment(p2, p1, p3) {
            return true;
        }
    }

    if (left012 > 0.0) == (left013 > 0.0) || (left230 > 0.0) == (left231 > 0.0) {
        // Only a zero-length segment sitting on the other one's start gets here.
        p1 == p2
    } else {
        true
    }
}

/// Winding-number containment test against a closed ring.
///
/// `ring` must repeat its first point at the end. The bounding box is checked
/// first and a point outside it is rejected without walking the edges.
/// Points exactly on an edge may be classified either way.
pub fn point_in_ring(point: &Point, ring: &[Point], bbox: &BoundingBox) -> bool {
    if !bbox.covers(point) {
        return false;
    }

    let mut winding_number = 0i32;
    for edge in ring.windows(2) {
        let (a, b) = (&edge[0], &edge[1]);
        if a.y <= point.y {
            if b.y > point.y && orientation(a, b, point) > 0.0 {
                winding_number += 1;
            }
        } else if b.y <= point.y && orientation(a, b, point) < 0.0 {
            winding_number -= 1;
        }
    }
    winding_number != 0
}
