//! Precipitation mapper CLI.
//!
//! Missing `--range` or `--date` values are prompted for on stdin.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use precip_common::{parse_product_date, TimeRange, Variant};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use precip_mapper::prompt::{prompt_date, prompt_time_range};
use precip_mapper::{run, MapRequest, MapperConfig, RasterSource};

#[derive(Parser, Debug)]
#[command(name = "precip-mapper")]
#[command(about = "Render NWS precipitation maps clipped to a boundary")]
struct Args {
    /// Time range: menu number (1-11) or identifier such as "last7days"
    #[arg(short, long, env = "PRECIP_RANGE")]
    range: Option<TimeRange>,

    /// Product date as YYYYMMDD
    #[arg(short, long, env = "PRECIP_DATE")]
    date: Option<String>,

    /// Variant(s) to render: observed, normal, departure, percent
    #[arg(short, long, value_delimiter = ',', default_value = "observed")]
    variant: Vec<Variant>,

    /// Render all four variants
    #[arg(long, conflicts_with = "variant")]
    all_variants: bool,

    /// Read a local zip archive instead of downloading
    #[arg(long, conflicts_with = "raster")]
    archive: Option<PathBuf>,

    /// Read a local GeoTIFF instead of downloading
    #[arg(long)]
    raster: Option<PathBuf>,

    /// Boundary GeoJSON (overrides the config file)
    #[arg(long, env = "PRECIP_BOUNDARY")]
    boundary: Option<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(short, long, env = "PRECIP_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "PRECIP_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let mut config = match &args.config {
        Some(path) => MapperConfig::load(path)?,
        None => MapperConfig::default(),
    };
    if let Some(boundary) = args.boundary {
        config.boundary.path = boundary;
    }
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let range = match args.range {
        Some(range) => range,
        None => prompt_time_range(&mut input, &mut out)?,
    };
    let date = match args.date.as_deref() {
        Some(date) => parse_product_date(date).context("Invalid --date")?,
        None => prompt_date(&mut input, &mut out, Local::now().date_naive())?,
    };

    let variants = if args.all_variants {
        Variant::ALL.to_vec()
    } else {
        args.variant
    };

    let source = match (args.archive, args.raster) {
        (Some(path), _) => RasterSource::Archive(path),
        (None, Some(path)) => RasterSource::GeoTiff(path),
        (None, None) => RasterSource::Download,
    };

    info!(
        range = %range,
        date = %date,
        variants = ?variants,
        boundary = %config.boundary.path.display(),
        "Starting precipitation mapper"
    );

    let request = MapRequest {
        range,
        date,
        variants,
    };
    let written = run(&config, &source, &request).await?;

    for map in &written {
        info!(
            variant = %map.variant,
            image = %map.image.display(),
            visible = map.visible_points,
            total = map.total_points,
            "Map written"
        );
    }
    info!(maps = written.len(), "Done");
    Ok(())
}
