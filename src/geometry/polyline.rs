use crate::math::{same_point, Point2, TOLERANCE};

/// A finished contour line: an ordered sequence of 2D vertices joined by
/// straight segments.
///
/// Rings are represented explicitly closed, i.e. the last vertex repeats the
/// first one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point2>,
}

impl Polyline {
    /// Creates a polyline from its vertices.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polyline has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first vertex, if any.
    #[must_use]
    pub fn start(&self) -> Option<&Point2> {
        self.points.first()
    }

    /// Returns the last vertex, if any.
    #[must_use]
    pub fn end(&self) -> Option<&Point2> {
        self.points.last()
    }

    /// Returns `true` if the polyline forms a ring: at least three segments
    /// and the last vertex coincides with the first.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                self.points.len() >= 4 && same_point(first, last, TOLERANCE)
            }
            _ => false,
        }
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Returns the total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Returns a new polyline with vertices in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }
}

impl From<Vec<Point2>> for Polyline {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}
