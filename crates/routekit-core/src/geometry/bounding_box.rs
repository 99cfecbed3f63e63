use super::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box used to reject containment and intersection
/// tests before the exact predicates run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// An inverted box that covers nothing and grows to fit whatever is
    /// merged into it.
    pub fn empty() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to(p);
        }
        bbox
    }

    /// Box spanned by a segment.
    pub fn from_segment(a: &Point, b: &Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn expand_to(&mut self, p: &Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn merge(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.expand_to(&other.min);
        self.expand_to(&other.max);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// True if `p` lies inside the box or on its border.
    pub fn covers(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// True if the two closed boxes share at least one point.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = [
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(4.0, -1.0),
        ];
        let bbox = BoundingBox::from_points(&pts);
        assert_eq!(bbox.min, Point::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point::new(4.0, 5.0));
        assert_eq!(bbox.width(), 6.0);
        assert_eq!(bbox.height(), 6.0);
    }

    #[test]
    fn test_covers_is_closed() {
        let bbox = BoundingBox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(bbox.covers(&Point::new(0.0, 0.5)));
        assert!(bbox.covers(&Point::new(1.0, 1.0)));
        assert!(!bbox.covers(&Point::new(1.0001, 0.5)));
    }

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let touching = BoundingBox::new(Point::new(1.0, 0.0), Point::new(2.0, 1.0));
        let apart = BoundingBox::new(Point::new(1.5, 0.0), Point::new(2.0, 1.0));
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_empty_box() {
        let mut bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        assert!(!bbox.covers(&Point::new(0.0, 0.0)));
        bbox.merge(&BoundingBox::empty());
        assert!(bbox.is_empty());
        bbox.expand_to(&Point::new(2.0, 3.0));
        assert!(!bbox.is_empty());
        assert!(bbox.covers(&Point::new(2.0, 3.0)));
    }
}
