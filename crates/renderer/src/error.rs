//! Error types for map rendering.

use precip_common::PrecipError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid canvas size {width}x{height}")]
    Canvas { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] std::io::Error),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Legend serialization failed: {0}")]
    Legend(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for PrecipError {
    fn from(err: RenderError) -> Self {
        PrecipError::Render(err.to_string())
    }
}
