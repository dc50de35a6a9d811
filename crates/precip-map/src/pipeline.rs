//! End-to-end map construction: convert, clip, classify, mask.

use precip_common::{Boundary, PrecipRaster, PrecipResult, Variant};
use projection::HrapProjection;
use tracing::info;

use crate::classify::{classify_with, ClassificationSpec, MaskThresholds};
use crate::clip::{clip, ClippedPointSet};
use crate::points::convert;

/// A classified, clipped and masked point map ready for rendering.
#[derive(Debug, Clone)]
pub struct MapProduct {
    /// Points inside the boundary, hidden values already set to NaN
    pub points: ClippedPointSet,
    pub classification: ClassificationSpec,
    pub statistic: Option<f64>,
}

/// Build a map product from one raster band on the CONUS HRAP grid.
///
/// An empty clip result is not an error; it yields a product with no
/// points and the finest bracket.
pub fn build_map(
    raster: &PrecipRaster,
    variant: Variant,
    boundary: &Boundary,
    thresholds: &MaskThresholds,
) -> PrecipResult<MapProduct> {
    build_map_with_projection(raster, &HrapProjection::conus(), variant, boundary, thresholds)
}

/// [`build_map`] for an explicit grid projection.
pub fn build_map_with_projection(
    raster: &PrecipRaster,
    projection: &HrapProjection,
    variant: Variant,
    boundary: &Boundary,
    thresholds: &MaskThresholds,
) -> PrecipResult<MapProduct> {
    let points = convert(raster, projection)?;
    let mut clipped = clip(points, boundary)?;

    let classification = classify_with(&clipped.values(), variant, thresholds);
    for point in clipped.points.iter_mut() {
        if classification.mask.hides(point.value) {
            point.value = f32::NAN;
        }
    }

    info!(
        variant = %variant,
        points = clipped.len(),
        visible = clipped.visible_count(),
        statistic = ?classification.statistic,
        "Built map product"
    );

    Ok(MapProduct {
        statistic: classification.statistic,
        points: clipped,
        classification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_common::{CrsCode, HrapGrid, PrecipError};

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let raster = PrecipRaster::filled(100, 100, 1.0);
        let err = build_map(
            &raster,
            Variant::Observed,
            &Boundary::empty(CrsCode::Epsg4326),
            &MaskThresholds::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PrecipError::ShapeMismatch { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_empty_boundary_flows_through() {
        let grid = HrapGrid::CONUS;
        let raster = PrecipRaster::filled(grid.rows, grid.cols, 2.0);
        let product = build_map(
            &raster,
            Variant::Observed,
            &Boundary::empty(CrsCode::Epsg4326),
            &MaskThresholds::default(),
        )
        .unwrap();
        assert!(product.points.is_empty());
        assert_eq!(product.statistic, None);
        assert_eq!(product.classification.bracket, 3);
    }
}
