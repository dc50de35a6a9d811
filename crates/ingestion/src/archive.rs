//! Naming and extraction for the NWS precipitation archive.
//!
//! The archive service returns a zip holding one GeoTIFF per request,
//! named `nws_precip_{code}_{YYYYMMDD}_conus.tif`.

use std::io::{Cursor, Read};

use chrono::NaiveDate;
use precip_common::time::format_product_date;
use precip_common::TimeRange;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{IngestionError, Result};

/// Default download URL; `{date}` and `{range}` are substituted.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://water.weather.gov/precip/downloader.php?date={date}&file_type=geotiff&range={range}&format=zip";

/// Build the download URL for a product.
pub fn download_url(template: &str, range: TimeRange, date: NaiveDate) -> String {
    template
        .replace("{date}", &format_product_date(date))
        .replace("{range}", range.range_id())
}

/// Name of the GeoTIFF member inside the archive.
pub fn archive_member_name(range: TimeRange, date: NaiveDate) -> String {
    format!(
        "nws_precip_{}_{}_conus.tif",
        range.file_code(),
        format_product_date(date)
    )
}

/// Extract one member from a zip archive held in memory.
///
/// Falls back to the only `.tif` member when `name` is absent, since the
/// service has changed its member naming before.
pub fn extract_member(archive: &[u8], name: &str) -> Result<Vec<u8>> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;

    let member = if zip.file_names().any(|n| n == name) {
        name.to_string()
    } else {
        let tifs: Vec<String> = zip
            .file_names()
            .filter(|n| n.to_lowercase().ends_with(".tif"))
            .map(str::to_string)
            .collect();
        match tifs.as_slice() {
            [only] => {
                warn!(expected = %name, found = %only, "Archive member name differs, using sole GeoTIFF");
                only.clone()
            }
            _ => return Err(IngestionError::MemberNotFound(name.to_string())),
        }
    };

    let mut file = zip.by_name(&member)?;
    let mut bytes = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut bytes)?;

    debug!(member = %member, bytes = bytes.len(), "Extracted archive member");
    Ok(bytes)
}
