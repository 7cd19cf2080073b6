//! Routing seam and an offline straight-line estimator.
//!
//! # Pluggability
//!
//! Geocoding and path-finding belong to the host system.  The planner only
//! needs two resolved legs, so the host implements [`LegSource`] over its
//! routing service of choice.  [`StraightLineEstimator`] is the offline
//! fallback: great-circle distance scaled by a road circuity factor, driven
//! at a constant average speed.

use eld_core::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::{Leg, PlanError, PlanResult, TripRoute};

// ── Stops ─────────────────────────────────────────────────────────────────────

/// A geocoded location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub label: String,
    pub point: GeoPoint,
}

impl Stop {
    pub fn new(label: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self { label: label.into(), point: GeoPoint::new(lat, lon) }
    }
}

/// The three locations of a trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripStops {
    pub current: Stop,
    pub pickup:  Stop,
    pub dropoff: Stop,
}

// ── LegSource trait ───────────────────────────────────────────────────────────

/// Pluggable source of resolved legs.
///
/// Implementations must be `Send + Sync` so one instance can serve trip
/// calculations running on several threads.
pub trait LegSource: Send + Sync {
    /// Resolve current → pickup and pickup → dropoff.
    fn route(&self, stops: &TripStops) -> PlanResult<TripRoute>;
}

// ── StraightLineEstimator ─────────────────────────────────────────────────────

/// Estimates legs without a road network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StraightLineEstimator {
    /// Road miles per great-circle mile.
    pub circuity:    f64,
    /// Average truck speed in miles per hour.
    pub average_mph: f64,
}

impl Default for StraightLineEstimator {
    fn default() -> Self {
        Self { circuity: 1.2, average_mph: 55.0 }
    }
}

impl StraightLineEstimator {
    fn leg(&self, index: usize, from: &Stop, to: &Stop) -> PlanResult<Leg> {
        for stop in [from, to] {
            if !stop.point.is_valid() {
                return Err(PlanError::InvalidLeg {
                    leg:    index,
                    reason: format!("{} has invalid coordinates {}", stop.label, stop.point),
                });
            }
        }
        let miles = from.point.distance_miles(to.point) * self.circuity;
        Ok(Leg::new(
            from.label.clone(),
            to.label.clone(),
            miles,
            miles / self.average_mph,
        ))
    }
}

impl LegSource for StraightLineEstimator {
    fn route(&self, stops: &TripStops) -> PlanResult<TripRoute> {
        let route = TripRoute::new(
            self.leg(0, &stops.current, &stops.pickup)?,
            self.leg(1, &stops.pickup, &stops.dropoff)?,
        );
        log::debug!(
            "estimated route: {:.1} mi, {:.2} h",
            route.total_miles(),
            route.total_drive_hours()
        );
        Ok(route)
    }
}
