//! Common types and utilities shared across the precipitation mapping crates.

pub mod bbox;
pub mod boundary;
pub mod crs;
pub mod error;
pub mod grid;
pub mod style;
pub mod time;
pub mod variant;

pub use bbox::BoundingBox;
pub use boundary::Boundary;
pub use crs::CrsCode;
pub use error::{PrecipError, PrecipResult};
pub use grid::{GridCell, HrapGrid, PrecipRaster};
pub use style::{Color, Palette};
pub use time::{parse_product_date, TimeRange};
pub use variant::Variant;
