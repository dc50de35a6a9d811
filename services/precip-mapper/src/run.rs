//! One mapping run: load the raster bands, then build and write a map per
//! requested variant.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ingestion::{archive_member_name, download_url, extract_member, read_geotiff, GeoTiffBands};
use precip_common::{Boundary, HrapGrid, PrecipError, TimeRange, Variant};
use precip_map::{build_map, MaskThresholds};
use renderer::{render_map_png, Legend, RenderOptions};
use tracing::{info, warn};

use crate::config::MapperConfig;
use crate::download::{ArchiveFetcher, FetchConfig};
use crate::output::{output_stem, write_map, WrittenMap};

/// Where the four-band GeoTIFF comes from.
#[derive(Debug, Clone)]
pub enum RasterSource {
    /// Fetch the archive from the configured URL
    Download,
    /// Local zip archive as served by the download service
    Archive(PathBuf),
    /// Local GeoTIFF, already extracted
    GeoTiff(PathBuf),
}

#[derive(Debug, Clone)]
pub struct MapRequest {
    pub range: TimeRange,
    pub date: NaiveDate,
    pub variants: Vec<Variant>,
}

/// Load and decode the GeoTIFF for a request.
pub async fn load_bands(
    config: &MapperConfig,
    source: &RasterSource,
    request: &MapRequest,
) -> Result<GeoTiffBands> {
    let member = archive_member_name(request.range, request.date);

    let tiff = match source {
        RasterSource::Download => {
            let url = download_url(&config.source.url_template, request.range, request.date);
            info!(url = %url, range = %request.range, "Fetching precipitation archive");
            let fetcher = ArchiveFetcher::new(FetchConfig::from(&config.source))?;
            let archive = fetcher
                .fetch(&url)
                .await
                .map_err(|e| PrecipError::UpstreamUnavailable(e.to_string()))?;
            extract_member(&archive, &member)
                .map_err(PrecipError::from)
                .with_context(|| format!("Failed to extract {}", member))?
        }
        RasterSource::Archive(path) => {
            let archive = tokio::fs::read(path)
                .await
                .map_err(|e| PrecipError::UpstreamUnavailable(e.to_string()))
                .with_context(|| format!("Failed to read archive: {}", path.display()))?;
            extract_member(&archive, &member)
                .map_err(PrecipError::from)
                .with_context(|| format!("Failed to extract {} from {}", member, path.display()))?
        }
        RasterSource::GeoTiff(path) => tokio::fs::read(path)
            .await
            .map_err(|e| PrecipError::UpstreamUnavailable(e.to_string()))
            .with_context(|| format!("Failed to read raster: {}", path.display()))?,
    };

    let bands = tokio::task::spawn_blocking(move || read_geotiff(&tiff))
        .await
        .context("GeoTIFF decode task panicked")?
        .map_err(PrecipError::from)
        .context("Failed to decode GeoTIFF")?;

    info!(
        rows = bands.rows,
        cols = bands.cols,
        bands = bands.band_count,
        nodata = ?bands.nodata,
        "Raster loaded"
    );
    Ok(bands)
}

/// Encoded outputs of one variant, before anything is written.
#[derive(Debug)]
pub struct RenderedVariant {
    pub variant: Variant,
    pub png: Vec<u8>,
    pub legend: Legend,
}

/// Build and render the map for one variant.
pub fn render_variant(
    bands: &GeoTiffBands,
    variant: Variant,
    boundary: &Boundary,
    thresholds: &MaskThresholds,
    options: &RenderOptions,
) -> Result<RenderedVariant> {
    let raster = bands
        .variant_raster(variant, &HrapGrid::CONUS)
        .map_err(PrecipError::from)
        .with_context(|| format!("No usable raster for {}", variant))?;

    let product = build_map(&raster, variant, boundary, thresholds)
        .with_context(|| format!("Failed to build {} map", variant))?;

    let png = render_map_png(&product, options)
        .map_err(PrecipError::from)
        .with_context(|| format!("Failed to render {} map", variant))?;

    let legend = Legend::new(
        &product.classification,
        product.points.visible_count(),
        product.points.len(),
    );

    Ok(RenderedVariant {
        variant,
        png,
        legend,
    })
}

/// Run the whole pipeline and write one image per requested variant.
pub async fn run(
    config: &MapperConfig,
    source: &RasterSource,
    request: &MapRequest,
) -> Result<Vec<WrittenMap>> {
    let crs_override = config.boundary.crs_override()?;
    let boundary_path = config.boundary.path.clone();
    let boundary = tokio::task::spawn_blocking(move || {
        ingestion::load_boundary(&boundary_path, crs_override)
    })
    .await
    .context("Boundary load task panicked")?
    .map_err(PrecipError::from)
    .with_context(|| format!("Failed to load boundary: {}", config.boundary.path.display()))?;

    if boundary.is_empty() {
        warn!(path = %config.boundary.path.display(), "Boundary has no polygons, maps will be empty");
    }

    let bands = Arc::new(load_bands(config, source, request).await?);
    let boundary = Arc::new(boundary);
    let options = config.output.render_options();

    let mut written = Vec::with_capacity(request.variants.len());
    for &variant in &request.variants {
        let bands = Arc::clone(&bands);
        let boundary = Arc::clone(&boundary);
        let thresholds = config.classification;
        let options = options.clone();

        let rendered = tokio::task::spawn_blocking(move || {
            render_variant(&bands, variant, &boundary, &thresholds, &options)
        })
        .await
        .context("Render task panicked")??;

        let stem = output_stem(request.date, request.range, variant);
        let legend = config.output.legend_sidecar.then_some(&rendered.legend);
        let (image, legend_path) = write_map(&config.output.dir, &stem, &rendered.png, legend).await?;

        written.push(WrittenMap {
            variant,
            image,
            legend: legend_path,
            visible_points: rendered.legend.visible_points,
            total_points: rendered.legend.total_points,
        });
    }

    Ok(written)
}
