//! Test data generators for synthetic precipitation products.
//!
//! These generators create predictable, verifiable rasters and encode them
//! the same way the NWS archive does (pixel-interleaved float GeoTIFF in a
//! zip), so the whole upstream path can be exercised without network access.

use std::io::{Cursor, Write};

use precip_common::{HrapGrid, PrecipRaster};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// A CONUS-shaped raster with every cell set to `value`.
pub fn constant_raster(value: f32) -> PrecipRaster {
    let grid = HrapGrid::CONUS;
    PrecipRaster::filled(grid.rows, grid.cols, value)
}

/// A CONUS-shaped raster whose value grows down the raster.
///
/// Cell (row, col) holds `row as f32 * step`, so values rise from the
/// northern edge (row 0) to the southern one.
pub fn ramp_raster(step: f32) -> PrecipRaster {
    let grid = HrapGrid::CONUS;
    let mut data = Vec::with_capacity(grid.len());
    for row in 0..grid.rows {
        data.extend(std::iter::repeat(row as f32 * step).take(grid.cols));
    }
    PrecipRaster::new(grid.rows, grid.cols, data).expect("ramp raster has grid shape")
}

/// A CONUS-shaped raster with `value` along its top (northernmost) row and
/// `background` everywhere else.
pub fn top_row_raster(value: f32, background: f32) -> PrecipRaster {
    let grid = HrapGrid::CONUS;
    let mut data = vec![background; grid.len()];
    data[..grid.cols].fill(value);
    PrecipRaster::new(grid.rows, grid.cols, data).expect("top row raster has grid shape")
}

/// Interleave four equally sized bands into one sample buffer.
pub fn interleave_bands(bands: [&[f32]; 4]) -> Vec<f32> {
    let len = bands[0].len();
    assert!(bands.iter().all(|b| b.len() == len), "bands must match in length");

    let mut samples = Vec::with_capacity(len * 4);
    for i in 0..len {
        for band in &bands {
            samples.push(band[i]);
        }
    }
    samples
}

/// Encode four bands as a pixel-interleaved float32 GeoTIFF.
///
/// Bands are row-major with row 0 written as the top of the image, i.e.
/// north-up like the NWS product.
///
/// `nodata`, when given, is written to the GDAL nodata tag.
pub fn encode_four_band_tiff(
    width: u32,
    height: u32,
    bands: [&[f32]; 4],
    nodata: Option<&str>,
) -> Vec<u8> {
    let samples = interleave_bands(bands);
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buf).expect("tiff encoder");
        let mut image = encoder
            .new_image::<colortype::RGBA32Float>(width, height)
            .expect("tiff image");
        if let Some(nodata) = nodata {
            image
                .encoder()
                .write_tag(Tag::Unknown(42113), nodata)
                .expect("nodata tag");
        }
        image.write_data(&samples).expect("tiff data");
    }
    buf.into_inner()
}

/// Wrap `data` in a zip archive under `name`.
pub fn zip_archive(name: &str, data: &[u8]) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buf);
        writer
            .start_file(name, zip::write::FileOptions::default())
            .expect("zip entry");
        writer.write_all(data).expect("zip data");
        writer.finish().expect("zip finish");
    }
    buf.into_inner()
}
