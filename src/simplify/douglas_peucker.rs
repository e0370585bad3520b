use crate::math::distance_2d::point_to_segment_dist;
use crate::math::Point2;

use super::Simplifier;

/// Ramer-Douglas-Peucker reduction: keeps every vertex deviating more than
/// `tolerance` from the chord of the span it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct DouglasPeucker {
    /// Maximum allowed deviation of a removed vertex.
    pub tolerance: f64,
}

impl DouglasPeucker {
    /// Creates a new simplifier with the given deviation tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Simplifier for DouglasPeucker {
    fn simplify(&self, points: &[Point2]) -> Vec<Point2> {
        let n = points.len();
        if n < 3 {
            return points.to_vec();
        }

        let mut keep = vec![false; n];
        keep[0] = true;
        keep[n - 1] = true;

        let mut spans = vec![(0, n - 1)];
        while let Some((first, last)) = spans.pop() {
            let mut max_dist = 0.0;
            let mut max_idx = None;
            for i in first + 1..last {
                let d = point_to_segment_dist(&points[i], &points[first], &points[last]);
                if d > max_dist {
                    max_dist = d;
                    max_idx = Some(i);
                }
            }

            if let Some(idx) = max_idx {
                if max_dist > self.tolerance {
                    keep[idx] = true;
                    spans.push((first, idx));
                    spans.push((idx, last));
                }
            }
        }

        points
            .iter()
            .zip(keep)
            .filter_map(|(pt, k)| k.then_some(*pt))
            .collect()
    }
}
