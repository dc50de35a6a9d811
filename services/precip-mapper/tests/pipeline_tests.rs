//! End-to-end runs against synthetic archives on disk.

use std::path::Path;

use chrono::NaiveDate;
use precip_common::{HrapGrid, PrecipError, TimeRange, Variant};
use precip_mapper::{run, MapRequest, MapperConfig, RasterSource};
use renderer::Legend;
use test_utils::{encode_four_band_tiff, geojson_square, zip_archive, KENTUCKY_BBOX};

fn request(variants: Vec<Variant>) -> MapRequest {
    MapRequest {
        range: TimeRange::OneDay,
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        variants,
    }
}

fn write_conus_archive(dir: &Path, member: &str) -> std::path::PathBuf {
    let n = HrapGrid::CONUS.len();
    let observed = vec![3.0f32; n];
    let normal = vec![2.0f32; n];
    let departure = vec![1.0f32; n];
    let percent = vec![150.0f32; n];
    let tiff = encode_four_band_tiff(
        HrapGrid::CONUS.cols as u32,
        HrapGrid::CONUS.rows as u32,
        [&observed, &normal, &departure, &percent],
        Some("-10000"),
    );
    let path = dir.join("precip.zip");
    std::fs::write(&path, zip_archive(member, &tiff)).unwrap();
    path
}

fn config_in(dir: &Path) -> MapperConfig {
    let (min_lon, min_lat, max_lon, max_lat) = KENTUCKY_BBOX;
    let boundary = dir.join("boundary.geojson");
    std::fs::write(&boundary, geojson_square(min_lon, min_lat, max_lon, max_lat)).unwrap();

    let mut config = MapperConfig::default();
    config.boundary.path = boundary;
    config.output.dir = dir.join("out");
    config.output.width = 400;
    config.output.legend_width = 80;
    config
}

#[tokio::test]
async fn test_archive_run_writes_every_variant() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = write_conus_archive(tmp.path(), "nws_precip_1day_20240115_conus.tif");
    let config = config_in(tmp.path());

    let written = run(
        &config,
        &RasterSource::Archive(archive),
        &request(Variant::ALL.to_vec()),
    )
    .await
    .unwrap();

    assert_eq!(written.len(), 4);
    for map in &written {
        let png = std::fs::read(&map.image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(map.total_points > 0);
        assert_eq!(map.visible_points, map.total_points, "{}", map.variant);

        let legend_path = map.legend.as_ref().unwrap();
        let legend = Legend::from_json(&std::fs::read_to_string(legend_path).unwrap()).unwrap();
        assert_eq!(legend.variant, map.variant);
        assert_eq!(legend.colors.len() + 1, legend.edges.len());
    }

    let names: Vec<String> = written
        .iter()
        .map(|m| m.image.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "20240115-1day-observed.png",
            "20240115-1day-normal.png",
            "20240115-1day-departure.png",
            "20240115-1day-percent.png",
        ]
    );
}

#[tokio::test]
async fn test_sidecar_can_be_disabled() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = write_conus_archive(tmp.path(), "nws_precip_1day_20240115_conus.tif");
    let mut config = config_in(tmp.path());
    config.output.legend_sidecar = false;

    let written = run(
        &config,
        &RasterSource::Archive(archive),
        &request(vec![Variant::Observed]),
    )
    .await
    .unwrap();

    assert!(written[0].legend.is_none());
    assert!(!config.output.dir.join("20240115-1day-observed.legend.json").exists());
}

#[tokio::test]
async fn test_wrong_shape_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let band = [0.5f32; 6];
    let tiff = encode_four_band_tiff(3, 2, [&band, &band, &band, &band], None);
    let path = tmp.path().join("small.tif");
    std::fs::write(&path, tiff).unwrap();
    let config = config_in(tmp.path());

    let err = run(
        &config,
        &RasterSource::GeoTiff(path),
        &request(vec![Variant::Observed]),
    )
    .await
    .unwrap_err();

    let shape_mismatch = err
        .chain()
        .filter_map(|e| e.downcast_ref::<PrecipError>())
        .any(|e| matches!(e, PrecipError::ShapeMismatch { rows: 2, cols: 3, .. }));
    assert!(shape_mismatch, "unexpected error: {err:#}");
    assert!(!config.output.dir.exists());
}

#[tokio::test]
async fn test_missing_archive_is_upstream_unavailable() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());

    let err = run(
        &config,
        &RasterSource::Archive(tmp.path().join("absent.zip")),
        &request(vec![Variant::Observed]),
    )
    .await
    .unwrap_err();

    let upstream = err
        .chain()
        .filter_map(|e| e.downcast_ref::<PrecipError>())
        .any(|e| matches!(e, PrecipError::UpstreamUnavailable(_)));
    assert!(upstream, "unexpected error: {err:#}");
}

#[tokio::test]
async fn test_missing_boundary_fails_before_loading_raster() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = config_in(tmp.path());
    config.boundary.path = tmp.path().join("nope.geojson");

    let err = run(
        &config,
        &RasterSource::Archive(tmp.path().join("absent.zip")),
        &request(vec![Variant::Observed]),
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("Failed to load boundary"));
}
