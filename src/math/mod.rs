pub mod distance_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if two ordinates are equal within `tol`.
#[must_use]
pub fn same_ordinate(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Returns `true` if both ordinates of `a` and `b` are equal within `tol`.
#[must_use]
pub fn same_point(a: &Point2, b: &Point2, tol: f64) -> bool {
    same_ordinate(a.x, b.x, tol) && same_ordinate(a.y, b.y, tol)
}
