use super::{BoundingBox, Point};
use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// One closed boundary loop.
///
/// The stored sequence always repeats its first point at the end. Either
/// orientation is accepted; the winding-number containment test does not
/// depend on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct Ring(Vec<Point>);

impl Ring {
    /// Builds a ring without validation, closing it if the input is open.
    ///
    /// Callers must supply at least three distinct, finite vertices; use
    /// [`Ring::try_new`] for untrusted input.
    pub fn new(mut points: Vec<Point>) -> Self {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
            if first != *last {
                points.push(first);
            }
        }
        Self(points)
    }

    /// Builds a ring after checking the planner's geometric preconditions.
    pub fn try_new(points: Vec<Point>) -> Result<Self, GeometryError> {
        let ring = Self::new(points);
        ring.validate()?;
        Ok(ring)
    }

    /// Checks that every coordinate is finite, that there are at least three
    /// distinct vertices and that the enclosed area is not zero.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if let Some((index, p)) = self.0.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate {
                index,
                x: p.x,
                y: p.y,
            });
        }

        let mut distinct: Vec<Point> = Vec::with_capacity(self.0.len());
        for p in self.vertices() {
            if !distinct.contains(p) {
                distinct.push(*p);
            }
        }
        if distinct.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: distinct.len(),
            });
        }
        if self.signed_area() == 0.0 {
            return Err(GeometryError::ZeroArea);
        }
        Ok(())
    }

    /// All points including the closing repeat.
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// The vertices without the closing repeat.
    pub fn vertices(&self) -> &[Point] {
        match self.0.len() {
            0 => &self.0,
            n => &self.0[..n - 1],
        }
    }

    /// Number of stored points, closing repeat included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Shoelace area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.0
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum::<f64>()
            / 2.0
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn reversed(&self) -> Self {
        let mut points = self.0.clone();
        points.reverse();
        Self(points)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.0)
    }
}

impl From<Vec<Point>> for Ring {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<Ring> for Vec<Point> {
    fn from(ring: Ring) -> Self {
        ring.0
    }
}

impl std::ops::Index<usize> for Ring {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.0[index]
    }
}

/// An outer ring plus zero or more holes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub outer: Ring,
    #[serde(default)]
    pub inners: Vec<Ring>,
}

impl Polygon {
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            inners: Vec::new(),
        }
    }

    pub fn with_holes(outer: Ring, inners: Vec<Ring>) -> Self {
        Self { outer, inners }
    }

    /// Validates and builds a polygon from raw point lists.
    pub fn try_new(outer: Vec<Point>, inners: Vec<Vec<Point>>) -> Result<Self, GeometryError> {
        let polygon = Self::with_holes(
            Ring::new(outer),
            inners.into_iter().map(Ring::new).collect(),
        );
        polygon.validate()?;
        Ok(polygon)
    }

    /// Validates the outer ring and every hole.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.outer.validate()?;
        for (index, hole) in self.inners.iter().enumerate() {
            hole.validate().map_err(|e| GeometryError::InvalidHole {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    /// Axis-aligned rectangle, counter-clockwise.
    pub fn rectangle(min: Point, max: Point) -> Self {
        Self::new(Ring::new(vec![
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ]))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.outer.bounding_box()
    }
}

/// A set of polygons with no required relationship between members.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.0.push(polygon);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for polygon in &self.0 {
            bbox.merge(&polygon.bounding_box());
        }
        bbox
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self(polygons)
    }
}

impl FromIterator<Polygon> for MultiPolygon {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MultiPolygon {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
