//! CSV leg loader.
//!
//! # CSV format
//!
//! One row per leg, in driving order (current → pickup, then pickup →
//! dropoff):
//!
//! ```csv
//! origin,destination,distance_miles,duration_hours
//! "Dallas, TX","Oklahoma City, OK",206.4,3.1
//! "Oklahoma City, OK","Denver, CO",681.2,10.2
//! ```
//!
//! Rows are validated as they are read; the first bad row aborts the load
//! with [`PlanError::InvalidLeg`] naming its zero-based position.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{Leg, PlanError, PlanResult, TripRoute};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LegRecord {
    origin:         String,
    destination:    String,
    distance_miles: f64,
    duration_hours: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a two-leg [`TripRoute`] from a CSV file.
pub fn load_route_csv(path: &Path) -> PlanResult<TripRoute> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    TripRoute::from_legs(load_legs_reader(file)?)
}

/// Read every leg from any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for legs streamed from
/// the routing service.
pub fn load_legs_reader<R: Read>(reader: R) -> PlanResult<Vec<Leg>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut legs = Vec::new();

    for (i, result) in csv_reader.deserialize::<LegRecord>().enumerate() {
        let row = result.map_err(|e| PlanError::Parse(e.to_string()))?;
        let leg = Leg {
            origin:         row.origin.trim().to_owned(),
            destination:    row.destination.trim().to_owned(),
            distance_miles: row.distance_miles,
            duration_hours: row.duration_hours,
        };
        leg.validate(i)?;
        legs.push(leg);
    }

    Ok(legs)
}
