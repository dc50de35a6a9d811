//! Data variants carried by the precipitation archive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PrecipError;

/// Which quantity a raster band holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Observed precipitation (inches)
    Observed,
    /// Climatological normal precipitation (inches)
    Normal,
    /// Observed minus normal (inches)
    DepartureAbsolute,
    /// Observed as a percentage of normal
    DeparturePercent,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Observed,
        Variant::Normal,
        Variant::DepartureAbsolute,
        Variant::DeparturePercent,
    ];

    /// Zero-based band index within the archive GeoTIFF.
    pub fn band_index(&self) -> usize {
        match self {
            Variant::Observed => 0,
            Variant::Normal => 1,
            Variant::DepartureAbsolute => 2,
            Variant::DeparturePercent => 3,
        }
    }

    /// Whether values are signed departures from normal.
    pub fn is_departure(&self) -> bool {
        matches!(self, Variant::DepartureAbsolute | Variant::DeparturePercent)
    }

    /// Short identifier used in file names and CLI flags.
    pub fn slug(&self) -> &'static str {
        match self {
            Variant::Observed => "observed",
            Variant::Normal => "normal",
            Variant::DepartureAbsolute => "departure",
            Variant::DeparturePercent => "percent",
        }
    }

    /// Units of the band values.
    pub fn units(&self) -> &'static str {
        match self {
            Variant::DeparturePercent => "%",
            _ => "in",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Variant {
    type Err = PrecipError;

    /// Accepts a slug, a snake_case name, or a 1-based band number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(n) = s.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|idx| Self::ALL.get(idx).copied())
                .ok_or_else(|| PrecipError::invalid_parameter("variant", format!("band must be 1-4, got {}", n)));
        }
        match s.as_str() {
            "observed" | "obs" => Ok(Variant::Observed),
            "normal" => Ok(Variant::Normal),
            "departure" | "departure_absolute" => Ok(Variant::DepartureAbsolute),
            "percent" | "departure_percent" => Ok(Variant::DeparturePercent),
            _ => Err(PrecipError::invalid_parameter("variant", format!("unknown variant '{}'", s))),
        }
    }
}
