use thiserror::Error;

/// Top-level error type for the Isolis contour stitcher.
#[derive(Debug, Error)]
pub enum IsolisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Stitch(#[from] StitchError),
}

/// Errors related to the input geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
}

/// Errors raised by the segment stitcher.
#[derive(Debug, Error)]
pub enum StitchError {
    #[error("live chain limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    #[error("scanline {line} completed after scanline {previous}")]
    LineOutOfOrder { previous: i64, line: i64 },
}

/// Convenience type alias for results using [`IsolisError`].
pub type Result<T> = std::result::Result<T, IsolisError>;
