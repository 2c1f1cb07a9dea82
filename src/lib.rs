//! Cleaning and aggregation pipeline for hand-entered toutouwai sighting
//! records: normalizes free-text trap codes, attaches trap GPS fixes, and
//! derives a per-band status summary (first/last seen, missing flag,
//! territory, averaged location).

pub mod clean;
pub mod export;
pub mod fetch;
pub mod gps;
pub mod summary;
pub mod util;
