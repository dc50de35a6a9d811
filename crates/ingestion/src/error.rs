//! Error types for the ingestion crate.

use precip_common::PrecipError;
use thiserror::Error;

/// Errors that can occur while loading rasters or boundaries.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to decode GeoTIFF: {0}")]
    TiffDecode(String),

    #[error("Failed to read archive: {0}")]
    Archive(String),

    #[error("Archive member not found: {0}")]
    MemberNotFound(String),

    #[error("Failed to parse GeoJSON: {0}")]
    GeoJsonParse(String),

    #[error("Unsupported boundary CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Band {band} requested but raster has {available} band(s)")]
    MissingBand { band: usize, available: usize },

    #[error("Unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    #[error("Raster shape {rows}x{cols} does not match expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}

impl From<tiff::TiffError> for IngestionError {
    fn from(err: tiff::TiffError) -> Self {
        IngestionError::TiffDecode(err.to_string())
    }
}

impl From<zip::result::ZipError> for IngestionError {
    fn from(err: zip::result::ZipError) -> Self {
        IngestionError::Archive(err.to_string())
    }
}

impl From<serde_json::Error> for IngestionError {
    fn from(err: serde_json::Error) -> Self {
        IngestionError::GeoJsonParse(err.to_string())
    }
}

impl From<IngestionError> for PrecipError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::ShapeMismatch {
                expected_rows,
                expected_cols,
                rows,
                cols,
            } => PrecipError::ShapeMismatch {
                expected_rows,
                expected_cols,
                rows,
                cols,
            },
            other => PrecipError::UpstreamUnavailable(other.to_string()),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
