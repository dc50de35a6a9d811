//! Raster and boundary sources for precipitation maps.
//!
//! Provides the upstream collaborators of the mapping core:
//!
//! - Archive naming and zip extraction for the NWS daily precipitation
//!   product
//! - GeoTIFF band decoding into [`PrecipRaster`](precip_common::PrecipRaster)
//!   values, with nodata mapped to NaN and shape checked against the HRAP grid
//! - GeoJSON boundary loading with CRS detection
//!
//! Every failure here surfaces as an upstream-unavailable or shape-mismatch
//! [`PrecipError`](precip_common::PrecipError) to callers of the core.

pub mod archive;
pub mod error;
pub mod geojson;
pub mod geotiff;

// Re-exports
pub use archive::{archive_member_name, download_url, extract_member, DEFAULT_URL_TEMPLATE};
pub use error::{IngestionError, Result};
pub use geojson::{load_boundary, parse_boundary};
pub use geotiff::{read_geotiff, GeoTiffBands};
