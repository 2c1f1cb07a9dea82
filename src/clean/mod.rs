pub mod date;
pub mod trap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::util::first_present;

/// Band value volunteers enter when the bird was seen but not identified.
const UNIDENTIFIED_BAND: &str = "U";

/// The feed carries two non-data rows directly under the header.
const SKIPPED_LEAD_ROWS: usize = 2;

#[derive(Debug, Error, PartialEq)]
pub enum CleanError {
    #[error("row {row}: cannot parse date {value:?} as dd/mm/yyyy")]
    DateFormat { row: usize, value: String },
    #[error("header is missing expected column {0:?}")]
    MissingColumn(String),
    #[error("values table is empty: no header row")]
    EmptyTable,
}

/// One cleaned observation row. Immutable after cleaning, except for the
/// single coordinate-enrichment pass in [`crate::gps::attach_coords`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Sighting {
    pub date: NaiveDate,
    pub volunteer: String,
    pub track: String,
    /// Canonical trap code from [`trap::normalize`]; possibly a non-numeric
    /// leftover, never absent.
    pub trap: String,
    pub band: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Lower-case + trim, applied to header names and volunteer entries.
pub fn clean_text(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Indices of the consumed columns, located by cleaned header name.
struct Columns {
    date: usize,
    volunteer: usize,
    track: usize,
    trap: usize,
    band: usize,
    new_bands: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, CleanError> {
        let names: Vec<String> = header.iter().map(|c| clean_text(c)).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| CleanError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            date: find("date")?,
            volunteer: find("volunteer")?,
            track: find("track")?,
            trap: find("closest trap/tracking tunnel")?,
            band: find("band")?,
            new_bands: find("new bands")?,
        })
    }
}

/// Turns the raw 2-D value table into typed sightings.
///
/// Row 0 is the header; the two rows under it are discarded; data starts at
/// row 3. Short rows are padded with empty cells. A malformed date anywhere
/// aborts the whole batch.
pub fn clean_rows(values: &[Vec<String>]) -> Result<Vec<Sighting>, CleanError> {
    let header = values.first().ok_or(CleanError::EmptyTable)?;
    let cols = Columns::from_header(header)?;

    let mut sightings = Vec::with_capacity(values.len().saturating_sub(1 + SKIPPED_LEAD_ROWS));
    for (idx, row) in values.iter().enumerate().skip(1 + SKIPPED_LEAD_ROWS) {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let raw_date = cell(cols.date);
        let date = date::parse_sighting_date(raw_date).ok_or_else(|| CleanError::DateFormat {
            row: idx,
            value: raw_date.to_string(),
        })?;

        let band = first_present([
            Some(cell(cols.band)).filter(|b| !b.is_empty() && *b != UNIDENTIFIED_BAND),
            Some(cell(cols.new_bands)).filter(|b| !b.is_empty()),
        ])
        .map(str::to_string);

        sightings.push(Sighting {
            date,
            volunteer: clean_text(cell(cols.volunteer)),
            track: cell(cols.track).to_string(),
            trap: trap::normalize(cell(cols.trap)),
            band,
            lat: None,
            lng: None,
        });
    }

    debug!(rows = sightings.len(), "cleaned sighting rows");
    Ok(sightings)
}
