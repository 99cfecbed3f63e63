//! Route ordering - visiting order for independent sub-paths and points
//!
//! Items are reduced to one representative point each and ordered from a
//! fixed start with a nearest neighbour tour, optionally refined by 2-opt.
//! The tour is open: it starts at the start point and ends at the last item.

use routekit_core::{Point, Ring, Segment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Something the tool must visit once.
pub trait Visitable {
    /// The point the tool arrives at and, for closed paths, leaves from.
    fn anchor(&self) -> Point;
}

impl Visitable for Point {
    fn anchor(&self) -> Point {
        *self
    }
}

/// A closed sub-path starts and ends at its first point. An empty path
/// anchors at the origin.
impl Visitable for Vec<Point> {
    fn anchor(&self) -> Point {
        self.first().copied().unwrap_or_default()
    }
}

impl Visitable for Ring {
    fn anchor(&self) -> Point {
        self.first().copied().unwrap_or_default()
    }
}

/// A drilled slot is entered and left at its first endpoint.
impl Visitable for Segment {
    fn anchor(&self) -> Point {
        self.start
    }
}

impl<T: Visitable + ?Sized> Visitable for &T {
    fn anchor(&self) -> Point {
        (**self).anchor()
    }
}

/// Ordering heuristic used by [`reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingStrategy {
    /// Nearest neighbour only.
    Greedy,
    /// Nearest neighbour followed by 2-opt refinement.
    #[default]
    TwoOpt,
}

/// Open tour length: start to the first item, then item to item.
pub fn tour_length<T: Visitable>(items: &[T], start: Point) -> f64 {
    let mut current = start;
    let mut length = 0.0;
    for item in items {
        let next = item.anchor();
        length += current.distance_to(&next);
        current = next;
    }
    length
}

/// Greedy nearest neighbour ordering from `start`.
///
/// Ties go to the item that came first. The new order is kept only if it is
/// strictly shorter than the order passed in. `_quantization` is accepted for
/// callers working on integer grids and is not used.
pub fn nearest_neighbour<T: Visitable>(items: &mut Vec<T>, start: Point, _quantization: f64) {
    if items.len() < 2 {
        return;
    }

    let anchors: Vec<Point> = items.iter().map(Visitable::anchor).collect();
    let original_length = tour_length(&anchors, start);

    let mut remaining: Vec<usize> = (0..anchors.len()).collect();
    let mut order = Vec::with_capacity(anchors.len());
    let mut new_length = 0.0;
    let mut current = start;

    while !remaining.is_empty() {
        let mut nearest = 0;
        let mut min_distance = current.comparable_distance(&anchors[remaining[0]]);
        for (position, &index) in remaining.iter().enumerate().skip(1) {
            let distance = current.comparable_distance(&anchors[index]);
            if distance < min_distance {
                min_distance = distance;
                nearest = position;
            }
        }
        let index = remaining.remove(nearest);
        new_length += current.distance_to(&anchors[index]);
        current = anchors[index];
        order.push(index);
    }

    if new_length < original_length {
        debug!(
            items = order.len(),
            original_length, new_length, "Nearest neighbour improved order"
        );
        permute(items, &order);
    }
}

/// Nearest neighbour followed by 2-opt passes until no swap helps.
///
/// Each pass looks at every pair of consecutive-item edges a-b and c-d and
/// reverses b..=c when that makes the two edges shorter. The start leg is
/// never changed by a swap. There is no pass limit.
pub fn tsp_2opt<T: Visitable>(items: &mut Vec<T>, start: Point, quantization: f64) {
    nearest_neighbour(items, start, quantization);
    if items.len() < 4 {
        return;
    }

    let mut anchors: Vec<Point> = items.iter().map(Visitable::anchor).collect();
    let mut passes = 0usize;
    let mut swaps = 0usize;
    let mut found_one = true;

    while found_one {
        found_one = false;
        passes += 1;
        for a in 0..anchors.len() {
            let b = a + 1;
            let mut c = b + 1;
            while c + 1 < anchors.len() {
                let d = c + 1;
                let current =
                    anchors[a].distance_to(&anchors[b]) + anchors[c].distance_to(&anchors[d]);
                let swapped =
                    anchors[a].distance_to(&anchors[c]) + anchors[b].distance_to(&anchors[d]);
                if current > swapped {
                    anchors[b..d].reverse();
                    items[b..d].reverse();
                    found_one = true;
                    swaps += 1;
                }
                c += 1;
            }
        }
    }

    debug!(items = items.len(), passes, swaps, "2-opt finished");
}

/// Orders `items` for visiting from `start`. The result is a permutation of
/// the input and its tour is never longer.
pub fn reorder<T: Visitable>(
    mut items: Vec<T>,
    start: Point,
    quantization: f64,
    strategy: OrderingStrategy,
) -> Vec<T> {
    match strategy {
        OrderingStrategy::Greedy => nearest_neighbour(&mut items, start, quantization),
        OrderingStrategy::TwoOpt => tsp_2opt(&mut items, start, quantization),
    }
    items
}

fn permute<T>(items: &mut Vec<T>, order: &[usize]) {
    let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.iter().filter_map(|&index| slots[index].take()));
}
