use std::cmp::Ordering;

use crate::math::{same_point, Point2};

use super::chain::ChainId;

#[derive(Debug, Clone, Copy)]
struct Entry {
    point: Point2,
    serial: u64,
    id: ChainId,
}

impl Entry {
    /// Total order: `y`, then `x`, then chain serial.
    fn cmp_key(&self, point: &Point2, serial: u64) -> Ordering {
        self.point
            .y
            .total_cmp(&point.y)
            .then_with(|| self.point.x.total_cmp(&point.x))
            .then_with(|| self.serial.cmp(&serial))
    }
}

/// Live chains sorted by one of their endpoints.
///
/// The stitcher keeps two of these, one keyed by chain start and one by
/// chain end. Entries are unique because the chain serial breaks ties
/// between chains sharing an endpoint.
#[derive(Debug, Clone, Default)]
pub struct EndpointIndex {
    entries: Vec<Entry>,
}

impl EndpointIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a chain keyed by `point` at its sorted position.
    pub fn insert(&mut self, point: Point2, serial: u64, id: ChainId) {
        let found = self.entries.binary_search_by(|e| e.cmp_key(&point, serial));
        debug_assert!(found.is_err(), "chain {serial} already indexed at {point}");
        let pos = found.unwrap_or_else(|pos| pos);
        self.entries.insert(pos, Entry { point, serial, id });
    }

    /// Removes the entry of the chain with `serial` keyed by `point`.
    ///
    /// `point` must be bit-identical to the key the chain was inserted with.
    pub fn remove(&mut self, point: &Point2, serial: u64) -> Option<ChainId> {
        self.entries
            .binary_search_by(|e| e.cmp_key(point, serial))
            .ok()
            .map(|pos| self.entries.remove(pos).id)
    }

    /// Returns the first chain, in index order, whose key is the same point
    /// as `point` within `tol`.
    #[must_use]
    pub fn find(&self, point: &Point2, tol: f64) -> Option<ChainId> {
        let lo = self.entries.partition_point(|e| e.point.y < point.y - tol);
        self.entries[lo..]
            .iter()
            .take_while(|e| e.point.y <= point.y + tol)
            .find(|e| same_point(&e.point, point, tol))
            .map(|e| e.id)
    }

    /// Iterates over `(key, chain)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (Point2, ChainId)> + '_ {
        self.entries.iter().map(|e| (e.point, e.id))
    }

    /// Iterates over the indexed chains in key order.
    pub fn ids(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Returns `true` if every entry sorts strictly before its successor.
    #[must_use]
    pub fn is_strictly_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[0].cmp_key(&w[1].point, w[1].serial) == Ordering::Less)
    }
}
