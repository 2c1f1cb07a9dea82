use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};
use tracing::warn;

use crate::clean::Sighting;

/// Nested lookup: track name → trap code → coordinate.
pub type TrapGps = HashMap<String, HashMap<String, Coord>>;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

/// Loads the trap GPS table from its JSON resource.
/// A missing or malformed file aborts the run.
pub fn load_trap_gps(path: impl AsRef<Path>) -> Result<TrapGps> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading trap GPS table {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing trap GPS table {}", path.display()))
}

/// Run-scoped coordinate resolver. Lookup misses never fail the pipeline;
/// they are tallied and read once at the end of the run.
pub struct GpsResolver {
    table: TrapGps,
    misses: HashMap<String, u64>,
}

impl GpsResolver {
    pub fn new(table: TrapGps) -> Self {
        Self {
            table,
            misses: HashMap::new(),
        }
    }

    /// Looks up `(track, trap)`. A miss yields `None` and is counted under
    /// the key `"{track}|{trap}"`.
    pub fn resolve(&mut self, track: &str, trap: &str) -> Option<Coord> {
        match self.table.get(track).and_then(|traps| traps.get(trap)) {
            Some(coord) => Some(*coord),
            None => {
                *self.misses.entry(format!("{}|{}", track, trap)).or_insert(0) += 1;
                None
            }
        }
    }

    /// Miss counts accumulated so far, keyed `"{track}|{trap}"`.
    pub fn missing_report(&self) -> &HashMap<String, u64> {
        &self.misses
    }

    /// Miss counts in stable key order, for the end-of-run report.
    pub fn sorted_misses(&self) -> Vec<(&str, u64)> {
        let mut misses: Vec<(&str, u64)> = self
            .misses
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        misses.sort();
        misses
    }
}

/// Single enrichment pass: fills in coordinates on cleaned sightings, then
/// logs every entry that could not be located.
pub fn attach_coords(sightings: &mut [Sighting], resolver: &mut GpsResolver) {
    for s in sightings.iter_mut() {
        if let Some(coord) = resolver.resolve(&s.track, &s.trap) {
            s.lat = Some(coord.lat);
            s.lng = Some(coord.lng);
        }
    }
    for (key, count) in resolver.sorted_misses() {
        warn!(%key, count, "no GPS fix for trap");
    }
}
