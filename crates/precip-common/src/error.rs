//! Error types for the precipitation mapping crates.

use thiserror::Error;

/// Result type alias using PrecipError.
pub type PrecipResult<T> = Result<T, PrecipError>;

/// Primary error type for map production.
///
/// An empty clip result is not represented here: it flows through the
/// pipeline as an empty point set and renders as a blank map.
#[derive(Debug, Error)]
pub enum PrecipError {
    // === Upstream Errors ===
    #[error("Upstream data unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Raster shape {rows}x{cols} does not match grid definition {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    // === Input Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid CRS: {0}")]
    InvalidCrs(String),

    // === Processing Errors ===
    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PrecipError {
    /// Shorthand for an invalid parameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        PrecipError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborts the run with no partial output.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PrecipError::InvalidParameter { .. })
    }

    /// Short machine-readable code, used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            PrecipError::UpstreamUnavailable(_) => "upstream_unavailable",
            PrecipError::ShapeMismatch { .. } => "shape_mismatch",
            PrecipError::InvalidParameter { .. } => "invalid_parameter",
            PrecipError::InvalidCrs(_) => "invalid_crs",
            PrecipError::Projection(_) => "projection",
            PrecipError::Render(_) => "render",
            PrecipError::Internal(_) => "internal",
        }
    }
}

impl From<std::io::Error> for PrecipError {
    fn from(err: std::io::Error) -> Self {
        PrecipError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for PrecipError {
    fn from(err: serde_json::Error) -> Self {
        PrecipError::Internal(format!("JSON error: {}", err))
    }
}
