//! Merging keep-in and keep-out members into one region before buffering.
//!
//! Members of a [`MultiPolygon`] may touch or overlap. Offsetting them one by
//! one would open a seam along every shared edge, so the members are combined
//! with `csgrs` boolean operations first and only the merged outline is
//! buffered.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use routekit_core::{MultiPolygon, Point, Polygon, Ring};

/// The area travel may use, before buffering.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Region {
    /// Keep-in minus keep-out. Outers grow and holes shrink when buffered.
    Bounded(Vec<Polygon>),
    /// The plane minus the merged keep-out. Outers shrink and holes grow when
    /// buffered.
    Unbounded(Vec<Polygon>),
}

impl Region {
    /// Merges the input. Output vertices within `snap_distance` of an input
    /// vertex are replaced by that input vertex, so rounding in the boolean
    /// operations does not move the waypoints.
    pub(crate) fn merge(
        keep_in: Option<&MultiPolygon>,
        keep_out: &MultiPolygon,
        snap_distance: f64,
    ) -> Self {
        let mut inputs: Vec<Point> = Vec::new();
        for polygon in keep_in.into_iter().flatten().chain(keep_out) {
            inputs.extend(polygon.outer.vertices());
            for hole in &polygon.inners {
                inputs.extend(hole.vertices());
            }
        }

        let obstacles = union_all(keep_out);
        match keep_in {
            Some(keep_in) => {
                let mut area = union_all(keep_in);
                if !keep_out.is_empty() {
                    area = area.difference(&obstacles);
                }
                Region::Bounded(to_polygons(&area, &inputs, snap_distance))
            }
            None => Region::Unbounded(to_polygons(&obstacles, &inputs, snap_distance)),
        }
    }
}

fn ring_sketch(ring: &Ring) -> Option<Sketch<()>> {
    ring.validate().ok()?;
    let points: Vec<[f64; 2]> = ring.vertices().iter().map(|p| [p.x, p.y]).collect();
    Some(Sketch::polygon(&points, None))
}

fn polygon_sketch(polygon: &Polygon) -> Option<Sketch<()>> {
    let mut sketch = ring_sketch(&polygon.outer)?;
    for hole in polygon.inners.iter().filter_map(ring_sketch) {
        sketch = sketch.difference(&hole);
    }
    Some(sketch)
}

fn union_all(polygons: &MultiPolygon) -> Sketch<()> {
    let mut sketches = polygons.iter().filter_map(polygon_sketch);
    let Some(mut merged) = sketches.next() else {
        return Sketch::new();
    };
    for s in sketches {
        merged = merged.union(&s);
    }
    merged
}

fn to_polygons(sketch: &Sketch<()>, inputs: &[Point], snap_distance: f64) -> Vec<Polygon> {
    let mp = sketch.to_multipolygon();
    let mut polygons = Vec::with_capacity(mp.0.len());
    for poly in mp.0 {
        let outer = poly
            .exterior()
            .0
            .iter()
            .map(|c| Point::new(c.x, c.y))
            .collect();
        let Some(outer) = clean_ring(outer, inputs, snap_distance) else {
            continue;
        };
        let inners = poly
            .interiors()
            .iter()
            .filter_map(|interior| {
                let points = interior.0.iter().map(|c| Point::new(c.x, c.y)).collect();
                clean_ring(points, inputs, snap_distance)
            })
            .collect();
        polygons.push(Polygon::with_holes(outer, inners));
    }
    polygons
}

/// Snaps, drops repeated points and the closing repeat, and rejects rings
/// left with fewer than three vertices.
fn clean_ring(points: Vec<Point>, inputs: &[Point], snap_distance: f64) -> Option<Ring> {
    let mut cleaned: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        let p = snap(p, inputs, snap_distance);
        if cleaned.last() != Some(&p) {
            cleaned.push(p);
        }
    }
    while cleaned.len() > 1 && cleaned.first() == cleaned.last() {
        cleaned.pop();
    }
    (cleaned.len() >= 3).then(|| Ring::new(cleaned))
}

fn snap(p: Point, inputs: &[Point], snap_distance: f64) -> Point {
    let limit = snap_distance * snap_distance;
    inputs
        .iter()
        .map(|input| (input, p.comparable_distance(input)))
        .filter(|(_, d)| *d <= limit)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(p, |(input, _)| *input)
}
