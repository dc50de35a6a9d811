//! GeoJSON boundary source.
//!
//! Accepts a FeatureCollection, a single Feature, or a bare Polygon /
//! MultiPolygon geometry. Non-areal geometries are skipped. The legacy
//! `crs` member (`{"type": "name", "properties": {"name": "..."}}`) selects
//! the boundary CRS; without it coordinates are taken as EPSG:4326.

use std::path::Path;

use geo::{Coord, LineString, Polygon};
use precip_common::{Boundary, CrsCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{IngestionError, Result};

/// Top-level GeoJSON object.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
    FeatureCollection {
        features: Vec<Feature>,
        #[serde(default)]
        crs: Option<NamedCrs>,
    },
    Feature {
        geometry: Option<Geometry>,
        #[serde(default)]
        crs: Option<NamedCrs>,
    },
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
        #[serde(default)]
        crs: Option<NamedCrs>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
        #[serde(default)]
        crs: Option<NamedCrs>,
    },
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
struct NamedCrs {
    properties: NamedCrsProperties,
}

#[derive(Debug, Deserialize)]
struct NamedCrsProperties {
    name: String,
}

/// Load a boundary from a GeoJSON file.
///
/// `crs_override` replaces whatever CRS the file declares.
pub fn load_boundary(path: impl AsRef<Path>, crs_override: Option<CrsCode>) -> Result<Boundary> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let boundary = parse_boundary(&content, crs_override)?;
    info!(
        path = %path.display(),
        crs = %boundary.crs,
        polygons = boundary.len(),
        "Loaded boundary"
    );
    Ok(boundary)
}

/// Parse a boundary from a GeoJSON string.
pub fn parse_boundary(json: &str, crs_override: Option<CrsCode>) -> Result<Boundary> {
    let doc: GeoJson = serde_json::from_str(json)?;

    let (declared, geometries) = match doc {
        GeoJson::FeatureCollection { features, crs } => {
            (crs, features.into_iter().filter_map(|f| f.geometry).collect())
        }
        GeoJson::Feature { geometry, crs } => (crs, geometry.into_iter().collect()),
        GeoJson::Polygon { coordinates, crs } => (crs, vec![Geometry::Polygon { coordinates }]),
        GeoJson::MultiPolygon { coordinates, crs } => {
            (crs, vec![Geometry::MultiPolygon { coordinates }])
        }
    };

    let crs = match (crs_override, declared) {
        (Some(crs), _) => crs,
        (None, Some(named)) => CrsCode::parse(&named.properties.name)
            .map_err(|_| IngestionError::UnsupportedCrs(named.properties.name.clone()))?,
        (None, None) => CrsCode::Epsg4326,
    };

    let mut polygons = Vec::new();
    let mut skipped = 0usize;
    for geometry in geometries {
        match geometry {
            Geometry::Polygon { coordinates } => polygons.push(to_polygon(coordinates)?),
            Geometry::MultiPolygon { coordinates } => {
                for rings in coordinates {
                    polygons.push(to_polygon(rings)?);
                }
            }
            Geometry::Unsupported => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "Ignored non-polygon geometries in boundary");
    }
    debug!(polygons = polygons.len(), crs = %crs, "Parsed boundary GeoJSON");

    Ok(Boundary::from_polygons(crs, polygons))
}

fn to_polygon(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>> {
    let mut rings = rings.into_iter().map(to_ring);
    let exterior = match rings.next() {
        Some(ring) => ring?,
        None => return Err(IngestionError::GeoJsonParse("polygon has no rings".to_string())),
    };
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_ring(positions: Vec<Vec<f64>>) -> Result<LineString<f64>> {
    positions
        .into_iter()
        .map(|pos| match pos.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(IngestionError::GeoJsonParse(format!(
                "position needs at least 2 values, got {}",
                pos.len()
            ))),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"NAME": "Franklin"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-85.0, 38.0], [-84.5, 38.0], [-84.5, 38.5], [-85.0, 38.5], [-85.0, 38.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"NAME": "Marker"},
                "geometry": {"type": "Point", "coordinates": [-84.8, 38.2]}
            }
        ]
    }"#;

    #[test]
    fn test_feature_collection() {
        let boundary = parse_boundary(SQUARE, None).unwrap();
        assert_eq!(boundary.crs, CrsCode::Epsg4326);
        assert_eq!(boundary.len(), 1);
        assert_eq!(boundary.polygons.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn test_named_crs() {
        let json = r#"{
            "type": "Feature",
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::3857"}},
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[0, 0], [10, 0], [10, 10], [0, 0]]],
                    [[[20, 20], [30, 20], [30, 30], [20, 20]]]
                ]
            }
        }"#;
        let boundary = parse_boundary(json, None).unwrap();
        assert_eq!(boundary.crs, CrsCode::Epsg3857);
        assert_eq!(boundary.len(), 2);
    }

    #[test]
    fn test_override_crs() {
        let boundary = parse_boundary(SQUARE, Some(CrsCode::Epsg4269)).unwrap();
        assert_eq!(boundary.crs, CrsCode::Epsg4269);
    }

    #[test]
    fn test_unknown_crs_rejected() {
        let json = r#"{
            "type": "Polygon",
            "crs": {"type": "name", "properties": {"name": "EPSG:3089"}},
            "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]
        }"#;
        assert!(matches!(
            parse_boundary(json, None),
            Err(IngestionError::UnsupportedCrs(_))
        ));
    }

    #[test]
    fn test_empty_collection() {
        let boundary = parse_boundary(r#"{"type": "FeatureCollection", "features": []}"#, None).unwrap();
        assert!(boundary.is_empty());
    }

    #[test]
    fn test_three_dimensional_positions() {
        let json = r#"{"type": "Polygon", "coordinates": [[[0, 0, 5], [1, 0, 5], [1, 1, 5], [0, 0, 5]]]}"#;
        let boundary = parse_boundary(json, None).unwrap();
        assert_eq!(boundary.polygons.0[0].exterior().0[1], Coord { x: 1.0, y: 0.0 });
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_boundary("{", None),
            Err(IngestionError::GeoJsonParse(_))
        ));
    }
}
