use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};
use tracing::info;

use crate::summary::BandSummary;

/// The persisted website file is a JS assignment, not bare JSON.
const DATA_PREFIX: &str = "data =";

/// Jitter step in degrees; published locations move by at most ±10 steps.
const WIGGLE_STEP: f64 = 0.00001;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Territory {
    pub text: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// One bird record as the website consumes it. `sex`, `description` and
/// `images` are curated by hand and carried over from the existing file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebsiteRecord {
    pub band: String,
    pub sex: String,
    pub territory: Territory,
    pub banded: String,
    pub confirmed_missing: String,
    pub description: String,
    pub images: Vec<String>,
}

/// Reads the persisted website data file, tolerating the `data =` prefix.
pub fn read_website_data(path: impl AsRef<Path>) -> Result<Vec<WebsiteRecord>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading website data {}", path.display()))?;
    let json = raw.trim_start().strip_prefix(DATA_PREFIX).unwrap_or(&raw);
    serde_json::from_str(json)
        .with_context(|| format!("parsing website data {}", path.display()))
}

/// Nudges a published coordinate so exact roost locations are not exposed.
fn wiggle(loc: f64, rng: &mut impl Rng) -> f64 {
    loc + f64::from(rng.gen_range(-10..=10)) * WIGGLE_STEP
}

/// Merges fresh summaries into the existing website records, keeping the
/// hand-curated fields of any band already published.
pub fn merge_website_data(
    summaries: &[BandSummary],
    existing: &[WebsiteRecord],
) -> Vec<WebsiteRecord> {
    let mut rng = rand::thread_rng();
    let by_band: HashMap<&str, &WebsiteRecord> =
        existing.iter().map(|r| (r.band.as_str(), r)).collect();

    summaries
        .iter()
        .map(|bird| {
            let prior = by_band.get(bird.band.as_str());
            WebsiteRecord {
                band: bird.band.clone(),
                sex: prior
                    .map(|p| p.sex.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                territory: Territory {
                    text: bird.territory_name.clone(),
                    lat: bird.lat.map(|l| wiggle(l, &mut rng)),
                    lng: bird.lng.map(|l| wiggle(l, &mut rng)),
                },
                banded: bird.first_seen.clone(),
                confirmed_missing: if bird.is_missing {
                    bird.last_seen.clone()
                } else {
                    String::new()
                },
                description: prior.map(|p| p.description.clone()).unwrap_or_default(),
                images: prior.map(|p| p.images.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Writes the records back in the `data = [...]` shape the website loads.
pub fn write_website_data(path: impl AsRef<Path>, records: &[WebsiteRecord]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records).context("serializing website data")?;
    fs::write(path, format!("{} {}", DATA_PREFIX, json))
        .with_context(|| format!("writing website data {}", path.display()))?;
    info!(records = records.len(), path = %path.display(), "wrote website data");
    Ok(())
}
