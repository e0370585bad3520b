use std::collections::VecDeque;

use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a live chain in the stitcher.
    pub struct ChainId;
}

/// Which ends of two chains meet when they are spliced together.
///
/// The first half names the end of the chain being absorbed, the second
/// half the end of the chain that absorbs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Junction {
    /// Absorbed start meets target end: target continues into the other chain.
    StartOnEnd,
    /// Absorbed start meets target start: the other chain is reversed and prepended.
    StartOnStart,
    /// Absorbed end meets target start: the other chain is prepended as is.
    EndOnStart,
    /// Absorbed end meets target end: the other chain is reversed and appended.
    EndOnEnd,
}

/// A polyline under construction.
///
/// Holds at least two vertices; `start` and `end` are always read from the
/// vertex sequence itself.
#[derive(Debug, Clone)]
pub struct Chain {
    vertices: VecDeque<Point2>,
    /// Extended since the last scanline sweep.
    pub touched: bool,
    /// Apply the stitcher's simplifier when this chain is finalized.
    pub simplify: bool,
    serial: u64,
}

impl Chain {
    /// Creates a touched two-vertex chain.
    #[must_use]
    pub fn new(start: Point2, end: Point2, simplify: bool, serial: u64) -> Self {
        Self {
            vertices: VecDeque::from([start, end]),
            touched: true,
            simplify,
            serial,
        }
    }

    /// The first vertex.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.vertices[0]
    }

    /// The last vertex.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.vertices[self.vertices.len() - 1]
    }

    /// Creation sequence number, unique within one stitcher.
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the vertices from start to end.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Point2> + '_ {
        self.vertices.iter()
    }

    /// Prepends `point` as the new start and marks the chain touched.
    pub fn push_front(&mut self, point: Point2) {
        self.vertices.push_front(point);
        self.touched = true;
    }

    /// Appends `point` as the new end and marks the chain touched.
    pub fn push_back(&mut self, point: Point2) {
        self.vertices.push_back(point);
        self.touched = true;
    }

    /// Splices `other` into this chain at `junction`, dropping the vertex the
    /// two chains share.
    ///
    /// The `touched` flag of `self` is left as is.
    pub fn absorb(&mut self, other: Chain, junction: Junction) {
        let mut other = other.vertices;
        match junction {
            Junction::StartOnEnd => {
                other.pop_front();
                self.vertices.extend(other);
            }
            Junction::StartOnStart => {
                other.pop_front();
                for v in other {
                    self.vertices.push_front(v);
                }
            }
            Junction::EndOnStart => {
                other.pop_back();
                for v in other.into_iter().rev() {
                    self.vertices.push_front(v);
                }
            }
            Junction::EndOnEnd => {
                other.pop_back();
                self.vertices.extend(other.into_iter().rev());
            }
        }
    }

    /// Consumes the chain, returning its vertices from start to end.
    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.vertices.into()
    }
}
