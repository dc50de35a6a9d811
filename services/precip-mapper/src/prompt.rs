//! Interactive prompts for the time range and product date.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use precip_common::time::PRODUCT_DATE_FORMAT;
use precip_common::TimeRange;

/// The numbered time range menu, one entry per line.
pub fn menu_text() -> String {
    let mut text = String::from("Select a time range:\n");
    for range in TimeRange::ALL {
        text.push_str(&format!("  {:>2}. {}\n", range.menu_number(), range.label()));
    }
    text
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("Failed to read from stdin")?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Show the menu and read choices until one is a valid menu number.
pub fn prompt_time_range<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<TimeRange> {
    write!(out, "{}", menu_text())?;

    loop {
        write!(out, "Enter choice (1-{}): ", TimeRange::ALL.len())?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            bail!("No time range selected (end of input)");
        };

        match line.parse::<usize>() {
            Ok(choice) => match TimeRange::from_menu(choice) {
                Ok(range) => return Ok(range),
                Err(_) => writeln!(out, "Please input a number corresponding to an option above.")?,
            },
            Err(_) => writeln!(
                out,
                "Incorrect input, please input a number corresponding to an option above."
            )?,
        }
    }
}

/// Read a YYYYMMDD date; a blank line selects `today`.
pub fn prompt_date<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    today: NaiveDate,
) -> Result<NaiveDate> {
    loop {
        write!(out, "Enter date (YYYYMMDD, blank for today): ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            bail!("No date entered (end of input)");
        };
        if line.is_empty() {
            return Ok(today);
        }

        match NaiveDate::parse_from_str(&line, PRODUCT_DATE_FORMAT) {
            Ok(date) => return Ok(date),
            Err(_) => writeln!(out, "Incorrect date format, should be YYYYMMDD.")?,
        }
    }
}
