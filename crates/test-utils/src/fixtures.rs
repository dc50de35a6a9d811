//! Common boundary fixtures for clipping and rendering tests.

use geo::{polygon, Polygon};
use precip_common::{Boundary, CrsCode};

/// Approximate Kentucky extent as (min_lon, min_lat, max_lon, max_lat).
pub const KENTUCKY_BBOX: (f64, f64, f64, f64) = (-89.6, 36.5, -81.9, 39.2);

/// Continental United States extent as (min_lon, min_lat, max_lon, max_lat).
pub const CONUS_BBOX: (f64, f64, f64, f64) = (-130.0, 20.0, -60.0, 55.0);

/// An axis-aligned rectangle as a geo polygon.
pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon<f64> {
    polygon![
        (x: min_x, y: min_y),
        (x: max_x, y: min_y),
        (x: max_x, y: max_y),
        (x: min_x, y: max_y),
    ]
}

/// A single-rectangle boundary in EPSG:4326.
pub fn square_boundary(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Boundary {
    Boundary::from_polygons(
        CrsCode::Epsg4326,
        vec![rectangle(min_lon, min_lat, max_lon, max_lat)],
    )
}

/// A rectangle around Kentucky, standing in for the county outline.
pub fn kentucky_box_boundary() -> Boundary {
    let (min_lon, min_lat, max_lon, max_lat) = KENTUCKY_BBOX;
    square_boundary(min_lon, min_lat, max_lon, max_lat)
}

/// GeoJSON FeatureCollection with one rectangular feature.
pub fn geojson_square(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> String {
    format!(
        r#"{{
  "type": "FeatureCollection",
  "features": [
    {{
      "type": "Feature",
      "properties": {{"NAME": "fixture"}},
      "geometry": {{
        "type": "Polygon",
        "coordinates": [[[{x0}, {y0}], [{x1}, {y0}], [{x1}, {y1}], [{x0}, {y1}], [{x0}, {y0}]]]
      }}
    }}
  ]
}}"#,
        x0 = min_lon,
        y0 = min_lat,
        x1 = max_lon,
        y1 = max_lat
    )
}
