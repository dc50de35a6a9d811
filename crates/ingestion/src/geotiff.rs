//! GeoTIFF band decoding for the NWS precipitation product.
//!
//! The product is a single-image, pixel-interleaved GeoTIFF with one band
//! per data variant (observed, normal, departure, percent of normal).
//! Samples equal to the `GDAL_NODATA` value become NaN.

use std::io::Cursor;

use precip_common::{HrapGrid, PrecipRaster, Variant};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tracing::{debug, info};

use crate::error::{IngestionError, Result};

/// GDAL's private tag holding the nodata value as ASCII.
const GDAL_NODATA_TAG: u16 = 42113;

/// All bands of a decoded GeoTIFF, pixel-interleaved.
#[derive(Debug, Clone)]
pub struct GeoTiffBands {
    pub rows: usize,
    pub cols: usize,
    pub band_count: usize,
    pub nodata: Option<f64>,
    samples: Vec<f32>,
}

impl GeoTiffBands {
    /// Build from interleaved samples (`band_count` values per pixel).
    pub fn from_interleaved(
        rows: usize,
        cols: usize,
        band_count: usize,
        nodata: Option<f64>,
        samples: Vec<f32>,
    ) -> Result<Self> {
        if band_count == 0 || samples.len() != rows * cols * band_count {
            return Err(IngestionError::TiffDecode(format!(
                "expected {} samples for {}x{}x{}, got {}",
                rows * cols * band_count,
                rows,
                cols,
                band_count,
                samples.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            band_count,
            nodata,
            samples,
        })
    }

    /// Extract one band (0-based) as a raster, mapping nodata to NaN.
    pub fn band(&self, band: usize) -> Result<PrecipRaster> {
        if band >= self.band_count {
            return Err(IngestionError::MissingBand {
                band,
                available: self.band_count,
            });
        }

        let nodata = self.nodata;
        let data: Vec<f32> = self
            .samples
            .iter()
            .skip(band)
            .step_by(self.band_count)
            .map(|&v| match nodata {
                Some(nd) if is_nodata(v, nd) => f32::NAN,
                _ => v,
            })
            .collect();

        PrecipRaster::new(self.rows, self.cols, data)
            .map_err(|e| IngestionError::TiffDecode(e.to_string()))
    }

    /// Extract the band for a variant and check it against the grid shape.
    pub fn variant_raster(&self, variant: Variant, grid: &HrapGrid) -> Result<PrecipRaster> {
        if self.rows != grid.rows || self.cols != grid.cols {
            return Err(IngestionError::ShapeMismatch {
                expected_rows: grid.rows,
                expected_cols: grid.cols,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let raster = self.band(variant.band_index())?;
        info!(
            variant = %variant,
            band = variant.band_index(),
            rows = raster.rows(),
            cols = raster.cols(),
            "Loaded raster band"
        );
        Ok(raster)
    }
}

fn is_nodata(value: f32, nodata: f64) -> bool {
    if nodata.is_nan() {
        return value.is_nan();
    }
    (value as f64 - nodata).abs() <= nodata.abs().max(1.0) * 1e-6
}

/// Decode an in-memory GeoTIFF into its bands.
pub fn read_geotiff(bytes: &[u8]) -> Result<GeoTiffBands> {
    let mut decoder = Decoder::new(Cursor::new(bytes))?.with_limits(Limits::unlimited());

    let (width, height) = decoder.dimensions()?;
    let band_count = decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap_or(1) as usize;
    let nodata = decoder
        .get_tag_ascii_string(Tag::Unknown(GDAL_NODATA_TAG))
        .ok()
        .and_then(|s| s.trim_matches(char::from(0)).trim().parse::<f64>().ok());

    debug!(width, height, band_count, ?nodata, "Decoding GeoTIFF");

    let samples = match decoder.read_image()? {
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
        _ => {
            return Err(IngestionError::UnsupportedSampleFormat(
                "expected floating point or integer samples".to_string(),
            ))
        }
    };

    GeoTiffBands::from_interleaved(height as usize, width as usize, band_count, nodata, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_deinterleave() {
        // 1x2 image, 3 bands
        let bands =
            GeoTiffBands::from_interleaved(1, 2, 3, None, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(bands.band(0).unwrap().data(), &[1.0, 4.0]);
        assert_eq!(bands.band(2).unwrap().data(), &[3.0, 6.0]);
        assert!(matches!(
            bands.band(3),
            Err(IngestionError::MissingBand { band: 3, available: 3 })
        ));
    }

    #[test]
    fn test_nodata_becomes_nan() {
        let bands =
            GeoTiffBands::from_interleaved(1, 3, 1, Some(-10000.0), vec![-10000.0, 0.5, 2.0]).unwrap();
        let raster = bands.band(0).unwrap();
        assert!(raster.data()[0].is_nan());
        assert_eq!(raster.data()[1], 0.5);
    }

    #[test]
    fn test_sample_count_checked() {
        assert!(GeoTiffBands::from_interleaved(2, 2, 2, None, vec![0.0; 7]).is_err());
    }

    #[test]
    fn test_shape_mismatch() {
        let bands = GeoTiffBands::from_interleaved(1, 1, 4, None, vec![0.0; 4]).unwrap();
        assert!(matches!(
            bands.variant_raster(Variant::Observed, &HrapGrid::CONUS),
            Err(IngestionError::ShapeMismatch { rows: 1, cols: 1, .. })
        ));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            read_geotiff(b"not a tiff"),
            Err(IngestionError::TiffDecode(_))
        ));
    }
}
