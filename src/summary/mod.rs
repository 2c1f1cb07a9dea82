use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::{cmp::Reverse, collections::BTreeMap};

use crate::clean::Sighting;
use crate::util::first_present;

/// Days without a sighting before a bird is presumed missing.
const MISSING_AFTER_DAYS: i64 = 31;

/// How many of the most recent sightings feed the coordinate average.
const COORD_SAMPLE: usize = 5;

/// Display format for first/last-seen dates.
const DISPLAY_DATE: &str = "%d-%m-%Y";

/// Banding scheme: two uppercase pairs joined by a dash, optional trailing
/// lowercase `u` for an unconfirmed read.
static BAND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}-[A-Z]{2}u?$").expect("band pattern"));

/// A band participates in the summary only if it follows the banding scheme
/// and belongs to the WM series.
fn is_tracked_band(band: &str) -> bool {
    BAND_PATTERN.is_match(band) && band.contains("WM")
}

/// Per-band status row, recomputed fresh on every [`summarize`] call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BandSummary {
    pub band: String,
    /// First-seen date, unformatted; the output sort key.
    pub date: NaiveDate,
    pub last_seen: String,
    pub first_seen: String,
    pub is_missing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// All-digit codes read as trap ids, anything else as a literal place name.
fn to_name(trap: &str, track: &str) -> String {
    if !trap.is_empty() && trap.bytes().all(|b| b.is_ascii_digit()) {
        format!("Trap {}, {}", trap, track)
    } else {
        format!("{}, {}", trap, track)
    }
}

/// Groups sightings by band and derives one status row per band, ordered by
/// first-seen date. Pure and stateless; only sightings with a valid WM-series
/// band dated on or before `as_of` participate.
pub fn summarize(sightings: &[Sighting], as_of: NaiveDate) -> Vec<BandSummary> {
    let mut groups: BTreeMap<&str, Vec<&Sighting>> = BTreeMap::new();
    for s in sightings {
        let band = match &s.band {
            Some(b) if is_tracked_band(b) => b.as_str(),
            _ => continue,
        };
        if s.date > as_of {
            continue;
        }
        groups.entry(band).or_default().push(s);
    }

    let mut rows: Vec<BandSummary> = groups
        .into_iter()
        .map(|(band, group)| summarize_band(band, &group, as_of))
        .collect();
    // Stable sort: bands first seen the same day stay in alphabetical order.
    rows.sort_by_key(|r| r.date);
    rows
}

/// `group` is non-empty and in input order.
fn summarize_band(band: &str, group: &[&Sighting], as_of: NaiveDate) -> BandSummary {
    // Stable sort keeps input order for sightings on the same date.
    let mut by_recency: Vec<&Sighting> = group.to_vec();
    by_recency.sort_by_key(|s| Reverse(s.date));
    let last = by_recency[0].date;
    let first = by_recency[by_recency.len() - 1].date;

    let territory_name = first_present(
        by_recency
            .iter()
            .map(|s| (!s.trap.is_empty()).then(|| to_name(&s.trap, &s.track))),
    );

    let coords: Vec<(f64, f64)> = by_recency
        .iter()
        .take(COORD_SAMPLE)
        .filter_map(|s| s.lat.zip(s.lng))
        .collect();
    let (lat, lng) = if coords.is_empty() {
        (None, None)
    } else {
        let n = coords.len() as f64;
        (
            Some(coords.iter().map(|(lat, _)| lat).sum::<f64>() / n),
            Some(coords.iter().map(|(_, lng)| lng).sum::<f64>() / n),
        )
    };

    BandSummary {
        band: band.to_string(),
        date: first,
        last_seen: last.format(DISPLAY_DATE).to_string(),
        first_seen: first.format(DISPLAY_DATE).to_string(),
        is_missing: (as_of - last).num_days().abs() > MISSING_AFTER_DAYS,
        territory_name,
        lat,
        lng,
    }
}
