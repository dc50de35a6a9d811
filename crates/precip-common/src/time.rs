//! Accumulation windows and product dates.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PrecipError, PrecipResult};

/// Date format used by the archive service, e.g. "20240115".
pub const PRODUCT_DATE_FORMAT: &str = "%Y%m%d";

/// Accumulation window of a precipitation product.
///
/// Menu numbers are 1-based in the order they are presented to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    OneDay,
    Last7Days,
    Last14Days,
    Last30Days,
    Last60Days,
    Last90Days,
    Last180Days,
    Last365Days,
    MonthToDate,
    YearToDate,
    WaterYearToDate,
}

impl TimeRange {
    /// All ranges in menu order.
    pub const ALL: [TimeRange; 11] = [
        TimeRange::OneDay,
        TimeRange::Last7Days,
        TimeRange::Last14Days,
        TimeRange::Last30Days,
        TimeRange::Last60Days,
        TimeRange::Last90Days,
        TimeRange::Last180Days,
        TimeRange::Last365Days,
        TimeRange::MonthToDate,
        TimeRange::YearToDate,
        TimeRange::WaterYearToDate,
    ];

    /// Look up a range by its 1-based menu number.
    pub fn from_menu(choice: usize) -> PrecipResult<Self> {
        choice
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| {
                PrecipError::invalid_parameter(
                    "range",
                    format!("menu choice must be 1-{}, got {}", Self::ALL.len(), choice),
                )
            })
    }

    /// 1-based menu number.
    pub fn menu_number(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).map_or(0, |idx| idx + 1)
    }

    /// Identifier used in the download query string.
    pub fn range_id(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1day",
            TimeRange::Last7Days => "last7days",
            TimeRange::Last14Days => "last14days",
            TimeRange::Last30Days => "last30days",
            TimeRange::Last60Days => "last60days",
            TimeRange::Last90Days => "last90days",
            TimeRange::Last180Days => "last180days",
            TimeRange::Last365Days => "last365days",
            TimeRange::MonthToDate => "month2date",
            TimeRange::YearToDate => "year2date",
            TimeRange::WaterYearToDate => "wateryear2date",
        }
    }

    /// Code embedded in the GeoTIFF member name inside the archive.
    pub fn file_code(&self) -> &'static str {
        match self {
            TimeRange::MonthToDate => "mtd",
            TimeRange::YearToDate => "ytd",
            TimeRange::WaterYearToDate => "wytd",
            other => other.range_id(),
        }
    }

    /// Human label for menus and logs.
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1 Day",
            TimeRange::Last7Days => "Last 7 Days",
            TimeRange::Last14Days => "Last 14 Days",
            TimeRange::Last30Days => "Last 30 Days",
            TimeRange::Last60Days => "Last 60 Days",
            TimeRange::Last90Days => "Last 90 Days",
            TimeRange::Last180Days => "Last 180 Days",
            TimeRange::Last365Days => "Last 365 Days",
            TimeRange::MonthToDate => "Month to Date",
            TimeRange::YearToDate => "Year to Date",
            TimeRange::WaterYearToDate => "Water Year to Date",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.range_id())
    }
}

impl FromStr for TimeRange {
    type Err = PrecipError;

    /// Accepts a menu number ("9") or a range identifier ("month2date").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(choice) = s.parse::<usize>() {
            return Self::from_menu(choice);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.range_id().eq_ignore_ascii_case(s) || r.file_code().eq_ignore_ascii_case(s))
            .ok_or_else(|| PrecipError::invalid_parameter("range", format!("unknown time range '{}'", s)))
    }
}

/// Parse a "YYYYMMDD" product date. Blank input means today.
pub fn parse_product_date(s: &str) -> PrecipResult<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(s, PRODUCT_DATE_FORMAT).map_err(|_| {
        PrecipError::invalid_parameter("date", format!("'{}' is not in the format YYYYMMDD", s))
    })
}

/// Format a date the way the archive service expects it.
pub fn format_product_date(date: NaiveDate) -> String {
    date.format(PRODUCT_DATE_FORMAT).to_string()
}
