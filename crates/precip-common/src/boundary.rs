//! Region-of-interest boundary polygons.

use geo::{BoundingRect, MultiPolygon, Polygon};

use crate::{BoundingBox, CrsCode};

/// A set of polygons delimiting the mapped region, in a known CRS.
///
/// Produced by a boundary source and consumed by the clipper, which
/// reprojects it to geographic coordinates before testing points.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub crs: CrsCode,
    pub polygons: MultiPolygon<f64>,
}

impl Boundary {
    pub fn new(crs: CrsCode, polygons: MultiPolygon<f64>) -> Self {
        Self { crs, polygons }
    }

    /// A boundary with no polygons. Clipping against it keeps nothing.
    pub fn empty(crs: CrsCode) -> Self {
        Self {
            crs,
            polygons: MultiPolygon::new(Vec::new()),
        }
    }

    pub fn from_polygons(crs: CrsCode, polygons: Vec<Polygon<f64>>) -> Self {
        Self::new(crs, MultiPolygon::new(polygons))
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.0.is_empty()
    }

    /// Number of polygons (counties, states, ...) in the boundary.
    pub fn len(&self) -> usize {
        self.polygons.0.len()
    }

    /// Bounding box in the boundary's own CRS.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.polygons
            .bounding_rect()
            .map(|rect| BoundingBox::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }
}
