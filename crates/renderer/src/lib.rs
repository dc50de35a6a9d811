//! Image rendering for precipitation point maps.
//!
//! - [`map`]: rasterise a clipped, classified point set with its boundary
//!   and colour bar using tiny-skia
//! - [`png`]: indexed/RGBA PNG encoding
//! - [`legend`]: JSON legend sidecar
//! - [`glyphs`]: segment glyphs for colour bar tick labels

pub mod error;
pub mod glyphs;
pub mod legend;
pub mod map;
pub mod png;

pub use error::{RenderError, Result};
pub use legend::Legend;
pub use map::{render_map, render_map_png, RenderOptions, RenderedMap};
pub use png::encode_png;
