use anyhow::Result;
use bandtrack::{clean, export::website, fetch, gps, summary};
use chrono::Local;
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Regenerates the website data file: summarizes every WM band as of today
/// and merges the fresh rows into the persisted records.
fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let mut args = env::args().skip(1);
    let values_path = args
        .next()
        .unwrap_or_else(|| "data/sheet_values.json".to_string());
    let gps_path = args
        .next()
        .unwrap_or_else(|| "data/trap_gps.json".to_string());
    let data_path = args
        .next()
        .unwrap_or_else(|| "../toutouwai/scripts/data.js".to_string());

    let values = fetch::load_values(&values_path)?;
    let mut sightings = clean::clean_rows(&values)?;
    info!(sightings = sightings.len(), "cleaned observation rows");

    let mut resolver = gps::GpsResolver::new(gps::load_trap_gps(&gps_path)?);
    gps::attach_coords(&mut sightings, &mut resolver);

    let as_of = Local::now().date_naive();
    let latest = summary::summarize(&sightings, as_of);
    info!(bands = latest.len(), %as_of, "summarized bands");

    let existing = website::read_website_data(&data_path)?;
    let merged = website::merge_website_data(&latest, &existing);
    website::write_website_data(&data_path, &merged)?;
    info!("all done");
    Ok(())
}
