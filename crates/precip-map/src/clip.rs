//! Spatial clipping of geolocated points against a boundary.

use geo::{BoundingRect, Coord, Intersects, MapCoords, Polygon, Rect};
use precip_common::{Boundary, CrsCode, PrecipError, PrecipResult};
use projection::to_geographic;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::points::GeoPoint;

/// Points inside a boundary, paired with that boundary in geographic
/// coordinates for rendering.
#[derive(Debug, Clone)]
pub struct ClippedPointSet {
    pub points: Vec<GeoPoint>,
    pub boundary: Boundary,
}

impl ClippedPointSet {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values of the retained points, in point order.
    pub fn values(&self) -> Vec<f32> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of points that still carry a value after masking.
    pub fn visible_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_visible()).count()
    }
}

/// Reproject a boundary into geographic lon/lat (EPSG:4326).
pub fn to_geographic_boundary(boundary: &Boundary) -> PrecipResult<Boundary> {
    if boundary.crs.is_geographic() {
        return Ok(Boundary::new(CrsCode::Epsg4326, boundary.polygons.clone()));
    }

    let crs = boundary.crs;
    let polygons = boundary
        .polygons
        .try_map_coords(|c: Coord<f64>| {
            to_geographic(crs, c.x, c.y).map(|(x, y)| Coord { x, y })
        })
        .map_err(|e| PrecipError::Projection(e.to_string()))?;

    debug!(from = %crs, polygons = polygons.0.len(), "Reprojected boundary to geographic");
    Ok(Boundary::new(CrsCode::Epsg4326, polygons))
}

/// Keep the points lying inside the union of the boundary polygons.
///
/// Points on a polygon edge are kept. An empty boundary or empty point set
/// gives an empty result, not an error.
pub fn clip(points: Vec<GeoPoint>, boundary: &Boundary) -> PrecipResult<ClippedPointSet> {
    let boundary = to_geographic_boundary(boundary)?;
    let total = points.len();

    if boundary.is_empty() || points.is_empty() {
        info!(total, kept = 0, "Boundary or point set empty, nothing to clip");
        return Ok(ClippedPointSet {
            points: Vec::new(),
            boundary,
        });
    }

    let parts: Vec<(Rect<f64>, &Polygon<f64>)> = boundary
        .polygons
        .0
        .iter()
        .filter_map(|poly| poly.bounding_rect().map(|rect| (rect, poly)))
        .collect();

    let kept: Vec<GeoPoint> = points
        .into_par_iter()
        .filter(|p| {
            let coord = Coord { x: p.lon, y: p.lat };
            parts
                .iter()
                .any(|(rect, poly)| rect.intersects(&coord) && poly.intersects(&coord))
        })
        .collect();

    info!(total, kept = kept.len(), polygons = parts.len(), "Clipped points to boundary");
    Ok(ClippedPointSet {
        points: kept,
        boundary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use precip_common::GridCell;
    use projection::mercator::lon_lat_to_mercator;
    use test_utils::assert_approx_eq;

    fn point(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint {
            lon,
            lat,
            value: 1.0,
            cell: GridCell::new(0, 0),
        }
    }

    fn unit_square() -> Boundary {
        Boundary::from_polygons(
            CrsCode::Epsg4326,
            vec![polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)]],
        )
    }

    #[test]
    fn test_inside_outside_and_edge() {
        let points = vec![point(0.5, 0.5), point(2.0, 0.5), point(1.0, 0.5), point(0.0, 0.0)];
        let clipped = clip(points, &unit_square()).unwrap();
        let kept: Vec<(f64, f64)> = clipped.points.iter().map(|p| (p.lon, p.lat)).collect();
        assert_eq!(kept, vec![(0.5, 0.5), (1.0, 0.5), (0.0, 0.0)]);
    }

    #[test]
    fn test_empty_boundary_gives_empty_set() {
        let clipped = clip(vec![point(0.5, 0.5)], &Boundary::empty(CrsCode::Epsg4326)).unwrap();
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_empty_points() {
        let clipped = clip(Vec::new(), &unit_square()).unwrap();
        assert!(clipped.is_empty());
        assert_eq!(clipped.boundary.len(), 1);
    }

    #[test]
    fn test_union_of_polygons() {
        let boundary = Boundary::from_polygons(
            CrsCode::Epsg4326,
            vec![
                polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)],
                polygon![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 6.0), (x: 5.0, y: 6.0)],
            ],
        );
        let points = vec![point(0.5, 0.5), point(3.0, 3.0), point(5.5, 5.5)];
        assert_eq!(clip(points, &boundary).unwrap().len(), 2);
    }

    #[test]
    fn test_mercator_boundary_reprojected() {
        let (x0, y0) = lon_lat_to_mercator(-85.0, 37.0);
        let (x1, y1) = lon_lat_to_mercator(-84.0, 38.0);
        let boundary = Boundary::from_polygons(
            CrsCode::Epsg3857,
            vec![polygon![(x: x0, y: y0), (x: x1, y: y0), (x: x1, y: y1), (x: x0, y: y1)]],
        );
        let clipped = clip(vec![point(-84.5, 37.5), point(-83.0, 37.5)], &boundary).unwrap();
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped.boundary.crs, CrsCode::Epsg4326);
        let ring = clipped.boundary.polygons.0[0].exterior();
        assert_approx_eq!(ring.0[0].x, -85.0, 1e-9);
    }
}
