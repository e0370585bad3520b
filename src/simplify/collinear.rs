use crate::math::distance_2d::cross;
use crate::math::Point2;

use super::Simplifier;

/// Default tolerance for collinearity, relative to the adjacent segment lengths.
const COLLINEAR_TOL: f64 = 1e-8;

/// Removes interior vertices lying on the straight line through their
/// neighbours.
///
/// Marching-squares output along axis-aligned or constant-slope runs is made
/// of many collinear vertices; this drops them without moving any kept vertex.
/// A vertex where the path doubles back on itself is kept.
#[derive(Debug, Clone, Copy)]
pub struct CollinearSimplifier {
    tolerance: f64,
}

impl CollinearSimplifier {
    /// Creates a simplifier with a custom relative collinearity tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn is_collinear(&self, a: &Point2, b: &Point2, c: &Point2) -> bool {
        let ab = b - a;
        let bc = c - b;
        // Same direction only: a spike back onto the line is a real vertex.
        ab.dot(&bc) > 0.0 && cross(a, b, c).abs() <= self.tolerance * ab.norm() * bc.norm()
    }
}

impl Default for CollinearSimplifier {
    fn default() -> Self {
        Self::new(COLLINEAR_TOL)
    }
}

impl Simplifier for CollinearSimplifier {
    fn simplify(&self, points: &[Point2]) -> Vec<Point2> {
        let n = points.len();
        if n < 3 {
            return points.to_vec();
        }

        let mut result: Vec<Point2> = Vec::with_capacity(n);
        result.push(points[0]);
        for i in 1..n - 1 {
            let prev = result[result.len() - 1];
            if !self.is_collinear(&prev, &points[i], &points[i + 1]) {
                result.push(points[i]);
            }
        }
        result.push(points[n - 1]);

        result
    }
}
