//! Grid-to-point conversion.
//!
//! Every raster cell becomes one [`GeoPoint`] at its cell-centre location.
//! The raster is stored north first (GeoTIFF order) while HRAP y grows
//! toward the pole, so raster row `i` sits on HRAP row `rows - 1 - i`.
//! Points come out in raster row-major order, which lets later stages
//! index them against `(row, col)` without a lookup.

use precip_common::{GridCell, PrecipRaster, PrecipResult};
use projection::HrapProjection;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// A grid cell resolved to geographic coordinates, with its data value.
///
/// `value` may be NaN, meaning "nothing to draw here".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Longitude in degrees, negative west
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    pub value: f32,
    /// Raster cell this point came from, row 0 northernmost
    pub cell: GridCell,
}

impl GeoPoint {
    pub fn is_visible(&self) -> bool {
        !self.value.is_nan()
    }
}

/// Convert a raster into geolocated points.
///
/// Always yields exactly `rows * cols` points. Fails only when the raster
/// shape differs from the projection's grid.
pub fn convert(raster: &PrecipRaster, projection: &HrapProjection) -> PrecipResult<Vec<GeoPoint>> {
    let grid = projection.grid();
    grid.check_shape(raster.rows(), raster.cols())?;

    let rows = raster.rows();
    let cols = raster.cols();

    let points: Vec<GeoPoint> = (0..rows)
        .into_par_iter()
        .flat_map_iter(|row| {
            let hrap_row = grid.hrap_row(row);
            raster.row(row).iter().enumerate().map(move |(col, &value)| {
                let (lon, lat) = projection.cell_to_geo(GridCell::new(hrap_row, col));
                GeoPoint {
                    lon,
                    lat,
                    value,
                    cell: GridCell::new(row, col),
                }
            })
        })
        .collect();

    debug!(rows, cols, points = points.len(), "Converted raster to points");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_common::{HrapGrid, PrecipError};
    use test_utils::{assert_coords_approx_eq, ramp_raster};

    #[test]
    fn test_point_count_with_nan() {
        let grid = HrapGrid::CONUS;
        let raster = PrecipRaster::filled(grid.rows, grid.cols, f32::NAN);
        let points = convert(&raster, &HrapProjection::conus()).unwrap();
        assert_eq!(points.len(), 881 * 1121);
        assert!(points.iter().all(|p| !p.is_visible()));
    }

    #[test]
    fn test_first_raster_row_is_north() {
        let grid = HrapGrid::CONUS;
        let mut data = vec![0.0f32; grid.len()];
        // Raster row 0, column 0: top-left of a north-up GeoTIFF.
        data[0] = 7.0;
        let raster = PrecipRaster::new(grid.rows, grid.cols, data).unwrap();
        let points = convert(&raster, &HrapProjection::conus()).unwrap();

        let top_left = &points[0];
        assert_eq!(top_left.cell, GridCell::new(0, 0));
        assert_eq!(top_left.value, 7.0);
        assert_coords_approx_eq!((top_left.lon, top_left.lat), (-134.0681, 53.4520), 1e-3);

        // The bottom-left cell is HRAP (0.5, 0.5), the grid's southern corner.
        let bottom_left = &points[(grid.rows - 1) * grid.cols];
        assert_eq!(bottom_left.value, 0.0);
        assert_coords_approx_eq!((bottom_left.lon, bottom_left.lat), (-119.0489, 23.0780), 1e-3);
    }

    #[test]
    fn test_latitude_falls_down_the_raster() {
        let raster = ramp_raster(1.0);
        let points = convert(&raster, &HrapProjection::conus()).unwrap();
        let cols = raster.cols();
        // Same column, rows further down the file hold larger values and lie further south.
        let column: Vec<&GeoPoint> = points.iter().skip(560).step_by(cols).collect();
        for pair in column.windows(2) {
            assert!(pair[1].value > pair[0].value);
            assert!(pair[1].lat < pair[0].lat);
        }
    }

    #[test]
    fn test_output_order_is_row_major() {
        let grid = HrapGrid::CONUS;
        let raster = PrecipRaster::filled(grid.rows, grid.cols, 1.0);
        let points = convert(&raster, &HrapProjection::conus()).unwrap();
        for (idx, point) in points.iter().enumerate().step_by(9973) {
            assert_eq!(point.cell.row * grid.cols + point.cell.col, idx);
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let raster = PrecipRaster::filled(10, 10, 0.0);
        assert!(matches!(
            convert(&raster, &HrapProjection::conus()),
            Err(PrecipError::ShapeMismatch { rows: 10, cols: 10, .. })
        ));
    }
}
