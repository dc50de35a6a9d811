//! Mapper configuration loaded from YAML.
//!
//! Every key is optional; missing keys fall back to the built-in defaults,
//! so an empty file is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use ingestion::DEFAULT_URL_TEMPLATE;
use precip_common::CrsCode;
use precip_map::MaskThresholds;
use renderer::RenderOptions;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub source: SourceConfig,
    pub boundary: BoundaryConfig,
    pub output: OutputConfig,
    pub classification: MaskThresholds,
}

/// Where and how to fetch the precipitation archive.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Download URL with `{date}` and `{range}` placeholders
    pub url_template: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub initial_retry_delay_secs: u64,
    pub max_retry_delay_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_secs: 120,
            max_retries: 3,
            initial_retry_delay_secs: 2,
            max_retry_delay_secs: 60,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// GeoJSON file with the region outline
    pub path: PathBuf,
    /// Overrides the CRS declared in the file, e.g. "EPSG:3857"
    pub crs: Option<String>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Ky_County_Lines.geojson"),
            crs: None,
        }
    }
}

impl BoundaryConfig {
    pub fn crs_override(&self) -> Result<Option<CrsCode>> {
        self.crs
            .as_deref()
            .map(|s| CrsCode::parse(s).with_context(|| format!("Invalid boundary CRS: {}", s)))
            .transpose()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub width: u32,
    pub marker_radius: f32,
    pub legend_width: u32,
    /// Write a `.legend.json` next to each image
    pub legend_sidecar: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            width: 2000,
            marker_radius: 3.0,
            legend_width: 160,
            legend_sidecar: true,
        }
    }
}

impl OutputConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            marker_radius: self.marker_radius,
            legend_width: self.legend_width,
            ..RenderOptions::default()
        }
    }
}

impl MapperConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded mapper config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}
