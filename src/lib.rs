pub mod error;
pub mod geometry;
pub mod math;
pub mod simplify;
pub mod stitch;

pub use error::{IsolisError, Result};
pub use geometry::Polyline;
pub use stitch::{SegmentStitcher, StitchConfig};
