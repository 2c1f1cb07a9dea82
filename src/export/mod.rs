pub mod website;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::clean::Sighting;

/// Writes the cleaned, coordinate-enriched observation table as CSV.
pub fn write_observations_csv(path: impl AsRef<Path>, sightings: &[Sighting]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating observation CSV {}", path.display()))?;
    for s in sightings {
        writer.serialize(s).context("serializing sighting row")?;
    }
    writer.flush().context("flushing observation CSV")?;
    info!(rows = sightings.len(), path = %path.display(), "wrote observation CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn writes_headers_and_optional_fields() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("observations.csv");
        let sightings = vec![Sighting {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            volunteer: "ana".to_string(),
            track: "Polhill".to_string(),
            trap: "62".to_string(),
            band: None,
            lat: Some(-41.3),
            lng: None,
        }];

        write_observations_csv(&path, &sightings)?;
        let contents = std::fs::read_to_string(&path)?;
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("date,volunteer,track,trap,band,lat,lng")
        );
        assert_eq!(lines.next(), Some("2024-01-05,ana,Polhill,62,,-41.3,"));
        Ok(())
    }
}
