//! Reprojection of boundary coordinates into geographic lon/lat.

use precip_common::CrsCode;
use thiserror::Error;

use crate::mercator::mercator_to_lon_lat;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Non-finite coordinate ({x}, {y}) in {crs}")]
    NonFinite { crs: CrsCode, x: f64, y: f64 },
}

/// Convert a coordinate in `crs` to geographic `(lon, lat)` degrees.
///
/// EPSG:4326 and EPSG:4269 pass through unchanged.
pub fn to_geographic(crs: CrsCode, x: f64, y: f64) -> Result<(f64, f64), TransformError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(TransformError::NonFinite { crs, x, y });
    }

    Ok(match crs {
        CrsCode::Epsg4326 | CrsCode::Epsg4269 => (x, y),
        CrsCode::Epsg3857 => mercator_to_lon_lat(x, y),
    })
}
