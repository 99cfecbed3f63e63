//! Memo of segment visibility results.

use routekit_core::Point;
use std::collections::HashMap;

/// Hashable identity of a point, built from the coordinate bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(u64, u64);

impl From<&Point> for PointKey {
    fn from(p: &Point) -> Self {
        // -0.0 and 0.0 compare equal as f64, so they must share a key.
        let normalize = |v: f64| if v == 0.0 { 0.0f64 } else { v };
        PointKey(normalize(p.x).to_bits(), normalize(p.y).to_bits())
    }
}

/// Remembers whether the straight segment between two points stays inside
/// the surface.
///
/// Keys are unordered pairs, so `a->b` and `b->a` share an entry. A cache is
/// only meaningful for the surface that filled it. The search creates a fresh
/// one per query unless the caller passes its own to reuse results across
/// queries against the same surface.
#[derive(Debug, Default, Clone)]
pub struct VisibilityCache {
    entries: HashMap<(PointKey, PointKey), bool>,
    hits: u64,
    misses: u64,
}

impl VisibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &Point, b: &Point) -> (PointKey, PointKey) {
        let (ka, kb) = (PointKey::from(a), PointKey::from(b));
        if ka <= kb {
            (ka, kb)
        } else {
            (kb, ka)
        }
    }

    pub fn get(&mut self, a: &Point, b: &Point) -> Option<bool> {
        let found = self.entries.get(&Self::key(a, b)).copied();
        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    pub fn insert(&mut self, a: &Point, b: &Point, visible: bool) {
        self.entries.insert(Self::key(a, b), visible);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// (hits, misses) since creation or the last [`VisibilityCache::clear`].
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
