//! Spherical Web Mercator (EPSG:3857).

use std::f64::consts::PI;

/// WGS84 semi-major axis, used as the sphere radius by Web Mercator.
pub const EARTH_RADIUS_M: f64 = 6378137.0;

/// Maximum latitude representable in Web Mercator.
pub const MAX_LATITUDE: f64 = 85.051128779806604;

/// Convert Web Mercator meters to `(lon, lat)` in degrees.
pub fn mercator_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

/// Convert `(lon, lat)` in degrees to Web Mercator meters.
///
/// Latitude is clamped to the Mercator limit.
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M * (PI / 4.0 + lat / 2.0).tan().ln();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{assert_approx_eq, assert_coords_approx_eq};

    #[test]
    fn test_origin() {
        let (lon, lat) = mercator_to_lon_lat(0.0, 0.0);
        assert_coords_approx_eq!((lon, lat), (0.0, 0.0), 1e-12);
    }

    #[test]
    fn test_roundtrip_louisville() {
        let (x, y) = lon_lat_to_mercator(-85.7585, 38.2527);
        let (lon, lat) = mercator_to_lon_lat(x, y);
        assert_coords_approx_eq!((lon, lat), (-85.7585, 38.2527), 1e-9);
    }

    #[test]
    fn test_extent_edge() {
        let (x, _) = lon_lat_to_mercator(180.0, 0.0);
        assert_approx_eq!(x, 20037508.342789244, 1e-6);
    }
}
