//! Output file naming and writing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use precip_common::time::format_product_date;
use precip_common::{TimeRange, Variant};
use renderer::Legend;
use tracing::info;

/// File stem shared by a map image and its legend, e.g.
/// `20240115-1day-observed`.
pub fn output_stem(date: NaiveDate, range: TimeRange, variant: Variant) -> String {
    format!(
        "{}-{}-{}",
        format_product_date(date),
        range.range_id(),
        variant.slug()
    )
}

/// Files written for one variant.
#[derive(Debug, Clone)]
pub struct WrittenMap {
    pub variant: Variant,
    pub image: PathBuf,
    pub legend: Option<PathBuf>,
    pub visible_points: usize,
    pub total_points: usize,
}

/// Write a PNG and, when given, its legend sidecar into `dir`.
pub async fn write_map(
    dir: &Path,
    stem: &str,
    png: &[u8],
    legend: Option<&Legend>,
) -> Result<(PathBuf, Option<PathBuf>)> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let image = dir.join(format!("{}.png", stem));
    tokio::fs::write(&image, png)
        .await
        .with_context(|| format!("Failed to write image: {}", image.display()))?;

    let legend_path = match legend {
        Some(legend) => {
            let path = dir.join(format!("{}.legend.json", stem));
            let json = legend.to_json().context("Failed to serialize legend")?;
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write legend: {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    info!(path = %image.display(), bytes = png.len(), "Wrote map");
    Ok((image, legend_path))
}
