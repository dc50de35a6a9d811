//! Coordinate reference system transformations.
//!
//! Implements the HRAP polar-stereographic inverse and the handful of
//! boundary reprojections needed, in closed form without a projection library.

pub mod hrap;
pub mod mercator;
pub mod transform;

pub use hrap::HrapProjection;
pub use transform::{to_geographic, TransformError};
