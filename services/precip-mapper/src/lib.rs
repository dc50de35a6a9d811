//! Precipitation map service.
//!
//! Fetches the NWS daily precipitation archive for a time range and date,
//! maps each requested variant onto a regional boundary and writes a PNG
//! (plus a JSON legend) per variant.

pub mod config;
pub mod download;
pub mod output;
pub mod prompt;
pub mod run;

pub use config::MapperConfig;
pub use output::{output_stem, WrittenMap};
pub use run::{run, MapRequest, RasterSource};
