//! Test support for the precipitation mapping crates.
//!
//! - [`generators`]: synthetic HRAP rasters, four-band GeoTIFFs and zip
//!   archives laid out like the NWS product
//! - [`fixtures`]: boundary boxes and GeoJSON documents
//! - [`paths`]: locating optional real data files
//!
//! Pull it in as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a real data file by name, or skip the calling test.
///
/// Large NWS archives are not committed; tests that need one return early
/// with a note on stderr when it is missing.
///
/// ```ignore
/// let path = require_test_file!("nws_precip_1day_20240115_conus.tif");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: '{}' not found; set TEST_DATA_DIR to run this test", $name);
                return;
            }
        }
    }};
}

/// Assert two numbers agree within `tolerance`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual = $actual as f64;
        let expected = $expected as f64;
        let tolerance = $tolerance as f64;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} within {} of {}, off by {}",
            actual,
            tolerance,
            expected,
            (actual - expected).abs()
        );
    }};
}

/// Assert a `(lon, lat)` pair agrees with another within `tolerance` degrees.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($lon:expr, $lat:expr), ($expected_lon:expr, $expected_lat:expr), $tolerance:expr) => {{
        $crate::assert_approx_eq!($lon, $expected_lon, $tolerance);
        $crate::assert_approx_eq!($lat, $expected_lat, $tolerance);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    #[should_panic(expected = "within")]
    fn test_approx_eq_reports_distance() {
        assert_coords_approx_eq!((-84.5, 38.0), (-84.5, 38.2), 0.1);
    }
}
