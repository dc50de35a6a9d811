//! End-to-end decoding of a synthetic NWS archive: zip -> GeoTIFF -> bands.

use chrono::NaiveDate;
use ingestion::{archive_member_name, extract_member, read_geotiff, IngestionError};
use precip_common::{HrapGrid, TimeRange, Variant};
use test_utils::{encode_four_band_tiff, require_test_file, zip_archive};

fn product_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

#[test]
fn test_small_archive_bands() {
    let observed = [0.0f32, 0.5, 1.25, -10000.0, 3.0, 7.5];
    let normal = [1.0f32; 6];
    let departure = [-1.0f32, -0.5, 0.25, -10000.0, 2.0, 6.5];
    let percent = [0.0f32, 50.0, 125.0, -10000.0, 300.0, 750.0];

    let tiff = encode_four_band_tiff(3, 2, [&observed, &normal, &departure, &percent], Some("-10000"));
    let name = archive_member_name(TimeRange::OneDay, product_date());
    let archive = zip_archive(&name, &tiff);

    let bytes = extract_member(&archive, &name).unwrap();
    let bands = read_geotiff(&bytes).unwrap();

    assert_eq!(bands.rows, 2);
    assert_eq!(bands.cols, 3);
    assert_eq!(bands.band_count, 4);
    assert_eq!(bands.nodata, Some(-10000.0));

    let obs = bands.band(Variant::Observed.band_index()).unwrap();
    assert_eq!(obs.get(0, 1), Some(0.5));
    assert!(obs.get(1, 0).unwrap().is_nan());

    let pct = bands.band(Variant::DeparturePercent.band_index()).unwrap();
    assert_eq!(pct.get(1, 2), Some(750.0));
}

#[test]
fn test_conus_archive_variant_raster() {
    let grid = HrapGrid::CONUS;
    let observed: Vec<f32> = (0..grid.len()).map(|i| (i % 100) as f32 * 0.1).collect();
    let zeros = vec![0.0f32; grid.len()];

    let tiff = encode_four_band_tiff(
        grid.cols as u32,
        grid.rows as u32,
        [&observed, &zeros, &zeros, &zeros],
        None,
    );
    let name = archive_member_name(TimeRange::Last7Days, product_date());
    let archive = zip_archive(&name, &tiff);

    let bytes = extract_member(&archive, &name).unwrap();
    let bands = read_geotiff(&bytes).unwrap();
    let raster = bands.variant_raster(Variant::Observed, &grid).unwrap();

    assert_eq!(raster.rows(), 881);
    assert_eq!(raster.cols(), 1121);
    assert_eq!(raster.data(), observed.as_slice());
}

#[test]
fn test_wrong_shape_rejected_for_conus() {
    let band = [0.0f32; 4];
    let tiff = encode_four_band_tiff(2, 2, [&band, &band, &band, &band], None);
    let bands = read_geotiff(&tiff).unwrap();

    assert!(matches!(
        bands.variant_raster(Variant::Normal, &HrapGrid::CONUS),
        Err(IngestionError::ShapeMismatch {
            expected_rows: 881,
            expected_cols: 1121,
            rows: 2,
            cols: 2
        })
    ));
}

#[test]
fn test_real_archive_if_present() {
    let path = require_test_file!("nws_precip_1day_20240115_conus.tif");
    let bytes = std::fs::read(path).unwrap();
    let bands = read_geotiff(&bytes).unwrap();
    assert_eq!(bands.band_count, 4);
    let raster = bands.variant_raster(Variant::Observed, &HrapGrid::CONUS).unwrap();
    assert!(raster.data().iter().any(|v| v.is_finite()));
}
