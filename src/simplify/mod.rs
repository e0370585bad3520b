//! Vertex reduction applied to chains when they are finalized.

mod collinear;
mod douglas_peucker;

pub use collinear::CollinearSimplifier;
pub use douglas_peucker::DouglasPeucker;

use crate::math::Point2;

/// Reduces the vertex count of an ordered vertex sequence while preserving
/// its overall shape.
///
/// Implementations must keep the first and last vertex in place so that a
/// closed ring stays closed.
pub trait Simplifier {
    /// Returns the reduced vertex sequence.
    fn simplify(&self, points: &[Point2]) -> Vec<Point2>;
}

impl<F> Simplifier for F
where
    F: Fn(&[Point2]) -> Vec<Point2>,
{
    fn simplify(&self, points: &[Point2]) -> Vec<Point2> {
        self(points)
    }
}
