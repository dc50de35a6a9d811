//! HRAP grid definition and raster containers.

use serde::{Deserialize, Serialize};

use crate::error::{PrecipError, PrecipResult};

/// Fixed definition of the HRAP polar-stereographic grid.
///
/// All constants used by the projector live here so the inverse can be
/// tested in isolation. The CONUS instance is the only one the data source
/// publishes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HrapGrid {
    /// Number of rows (y direction)
    pub rows: usize,
    /// Number of columns (x direction)
    pub cols: usize,
    /// HRAP x offset of the westernmost column
    pub x_origin: f64,
    /// HRAP y offset of the southernmost row
    pub y_origin: f64,
    /// HRAP x coordinate of the North Pole
    pub pole_x: f64,
    /// HRAP y coordinate of the North Pole
    pub pole_y: f64,
    /// Earth radius in kilometres
    pub earth_radius_km: f64,
    /// Standard longitude in degrees (west positive)
    pub standard_lon: f64,
    /// Mesh length at the true latitude, in kilometres
    pub mesh_length_km: f64,
    /// Latitude of true scale in degrees
    pub true_lat: f64,
}

impl HrapGrid {
    /// The national CONUS grid: 881 rows by 1121 columns.
    pub const CONUS: HrapGrid = HrapGrid {
        rows: 881,
        cols: 1121,
        x_origin: 0.0,
        y_origin: 0.0,
        pole_x: 401.0,
        pole_y: 1601.0,
        earth_radius_km: 6371.2,
        standard_lon: 105.0,
        mesh_length_km: 4.7625,
        true_lat: 60.0,
    };

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Continuous HRAP coordinate of a cell's centre, as `(hrap_x, hrap_y)`.
    ///
    /// `cell.row` is an HRAP row, counted from the southern edge.
    pub fn cell_center(&self, cell: GridCell) -> (f64, f64) {
        (
            cell.col as f64 + self.x_origin + 0.5,
            cell.row as f64 + self.y_origin + 0.5,
        )
    }

    /// HRAP row of a raster row, and the reverse.
    ///
    /// Rasters are stored north first while HRAP y grows toward the pole,
    /// so raster row `i` lies on HRAP row `rows - 1 - i`.
    pub fn hrap_row(&self, raster_row: usize) -> usize {
        self.rows - 1 - raster_row
    }

    /// Fail with ShapeMismatch unless `rows x cols` matches this grid.
    pub fn check_shape(&self, rows: usize, cols: usize) -> PrecipResult<()> {
        if rows != self.rows || cols != self.cols {
            return Err(PrecipError::ShapeMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                rows,
                cols,
            });
        }
        Ok(())
    }
}

impl Default for HrapGrid {
    fn default() -> Self {
        Self::CONUS
    }
}

/// A 0-based (row, column) grid index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One band of precipitation values, row-major with the northernmost row
/// first (GeoTIFF order).
///
/// NaN marks cells with no data.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipRaster {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl PrecipRaster {
    /// Wrap row-major data. Fails if the buffer length is not `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> PrecipResult<Self> {
        if data.len() != rows * cols {
            return Err(PrecipError::Internal(format!(
                "raster buffer has {} values, expected {}x{}={}",
                data.len(),
                rows,
                cols,
                rows * cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// A raster with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at a storage position, or None when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// One storage row.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}
