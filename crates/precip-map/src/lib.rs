//! Core of the precipitation mapper.
//!
//! Turns an HRAP precipitation raster into a classified point map clipped
//! to a regional boundary:
//!
//! ```text
//! PrecipRaster
//!      │
//!      ▼
//! points::convert ──► Vec<GeoPoint>         (one point per cell, row-flipped)
//!      │
//!      ▼
//! clip::clip ───────► ClippedPointSet       (inside the boundary union)
//!      │
//!      ▼
//! classify::classify ► ClassificationSpec   (edges, labels, colours, mask)
//!      │
//!      ▼
//!   renderer
//! ```
//!
//! [`build_map`] runs the whole chain and applies the mask.
//!
//! # Example
//!
//! ```ignore
//! use precip_map::{build_map, MaskThresholds};
//! use precip_common::Variant;
//!
//! let product = build_map(&raster, Variant::Observed, &boundary, &MaskThresholds::default())?;
//! println!("{} points, max {:?}", product.points.len(), product.statistic);
//! ```

pub mod classify;
pub mod clip;
pub mod pipeline;
pub mod points;

// Re-export commonly used types at crate root
pub use classify::{
    classify, classify_with, magnitude_statistic, ClassificationSpec, MaskRule, MaskThresholds,
};
pub use clip::{clip, ClippedPointSet};
pub use pipeline::{build_map, build_map_with_projection, MapProduct};
pub use points::{convert, GeoPoint};
