//! HRAP polar-stereographic projection.
//!
//! The Hydrologic Rainfall Analysis Project grid is a polar stereographic
//! grid true at 60°N, oriented along 105°W, with a 4.7625 km mesh. Grid
//! coordinates are measured in mesh units from an origin that places the
//! North Pole at HRAP (401, 1601).
//!
//! The inverse returns longitude positive west of Greenwich; callers negate
//! it to obtain a standard signed longitude. [`HrapProjection::cell_to_geo`]
//! does that for you.

use std::f64::consts::PI;

use precip_common::{BoundingBox, GridCell, HrapGrid};

/// HRAP inverse (and forward) projection for a fixed grid definition.
#[derive(Debug, Clone)]
pub struct HrapProjection {
    grid: HrapGrid,
    /// Stereographic scale factor in mesh units
    gi: f64,
}

impl HrapProjection {
    /// Create a projection for the given grid definition.
    pub fn new(grid: HrapGrid) -> Self {
        let true_lat = grid.true_lat.to_radians();
        let gi = grid.earth_radius_km * (1.0 + true_lat.sin()) / grid.mesh_length_km;
        Self { grid, gi }
    }

    /// Projection for the national CONUS grid.
    pub fn conus() -> Self {
        Self::new(HrapGrid::CONUS)
    }

    pub fn grid(&self) -> &HrapGrid {
        &self.grid
    }

    /// Convert continuous HRAP coordinates to `(lon, lat)` in degrees.
    ///
    /// Longitude is in the grid's internal convention, positive west and
    /// normalised to [0, 360].
    pub fn project(&self, hrap_x: f64, hrap_y: f64) -> (f64, f64) {
        let to_deg = 180.0 / PI;

        let x = hrap_x - self.grid.pole_x;
        let y = hrap_y - self.grid.pole_y;
        let rr = x * x + y * y;

        let lat = (PI / 2.0 - 2.0 * rr.sqrt().atan2(self.gi)) * to_deg;

        let mut ang = y.atan2(x) * to_deg;
        if ang < 0.0 {
            ang += 360.0;
        }

        // Single-step wrap; the grid never needs more than one correction.
        let mut lon = 270.0 + self.grid.standard_lon - ang;
        if lon < 0.0 {
            lon += 360.0;
        }
        if lon > 360.0 {
            lon -= 360.0;
        }

        (lon, lat)
    }

    /// Geographic `(lon, lat)` of an HRAP cell centre (row 0 southernmost),
    /// longitude negative west.
    pub fn cell_to_geo(&self, cell: GridCell) -> (f64, f64) {
        let (hrap_x, hrap_y) = self.grid.cell_center(cell);
        let (lon, lat) = self.project(hrap_x, hrap_y);
        (-lon, lat)
    }

    /// Convert geographic coordinates (longitude negative west) to
    /// continuous HRAP coordinates.
    pub fn geo_to_hrap(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lat = lat_deg.to_radians();
        let r = self.gi * ((PI / 2.0 - lat) / 2.0).tan();

        // Undo the longitude convention: lon_west = 270 + stdlon - ang.
        let ang = (270.0 + self.grid.standard_lon + lon_deg).to_radians();

        (
            r * ang.cos() + self.grid.pole_x,
            r * ang.sin() + self.grid.pole_y,
        )
    }

    /// Approximate geographic bounds of all cell centres, sampled along the
    /// grid edges.
    ///
    /// Edges of a polar stereographic grid are curved in lon/lat, so the
    /// result encloses the footprint rather than matching it.
    pub fn geographic_bounds(&self) -> BoundingBox {
        let last_row = self.grid.rows.saturating_sub(1);
        let last_col = self.grid.cols.saturating_sub(1);

        let mut samples = Vec::new();
        for t in 0..=20 {
            let col = last_col * t / 20;
            let row = last_row * t / 20;
            samples.push(GridCell::new(0, col));
            samples.push(GridCell::new(last_row, col));
            samples.push(GridCell::new(row, 0));
            samples.push(GridCell::new(row, last_col));
        }

        BoundingBox::from_points(samples.into_iter().map(|cell| self.cell_to_geo(cell)))
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }
}

impl Default for HrapProjection {
    fn default() -> Self {
        Self::conus()
    }
}
