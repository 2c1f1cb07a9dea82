use anyhow::Result;
use bandtrack::{clean, export, fetch, gps};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Exports the cleaned, coordinate-enriched observation table as CSV.
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
    let out_path = args
        .next()
        .unwrap_or_else(|| "data/waimapihi_observation_data.csv".to_string());

    let values = fetch::load_values(&values_path)?;
    let mut sightings = clean::clean_rows(&values)?;
    info!(sightings = sightings.len(), "cleaned observation rows");

    let mut resolver = gps::GpsResolver::new(gps::load_trap_gps(&gps_path)?);
    gps::attach_coords(&mut sightings, &mut resolver);

    export::write_observations_csv(&out_path, &sightings)?;
    info!("all done");
    Ok(())
}
