//! Physical legs supplied by the routing collaborator.

use serde::{Deserialize, Serialize};

use crate::{PlanError, PlanResult};

/// Above this average speed a leg is still accepted but logged as suspicious.
const SUSPICIOUS_MPH: f64 = 80.0;

/// One point-to-point movement with a resolved distance and duration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub origin:         String,
    pub destination:    String,
    pub distance_miles: f64,
    pub duration_hours: f64,
}

impl Leg {
    pub fn new(
        origin:         impl Into<String>,
        destination:    impl Into<String>,
        distance_miles: f64,
        duration_hours: f64,
    ) -> Self {
        Self {
            origin:      origin.into(),
            destination: destination.into(),
            distance_miles,
            duration_hours,
        }
    }

    /// Reject non-positive or non-finite distance/duration.
    ///
    /// `index` is the leg's position in the route and is only used in the
    /// error message.
    pub fn validate(&self, index: usize) -> PlanResult<()> {
        if !self.distance_miles.is_finite() || self.distance_miles <= 0.0 {
            return Err(PlanError::InvalidLeg {
                leg:    index,
                reason: format!("distance must be positive (got {} mi)", self.distance_miles),
            });
        }
        if !self.duration_hours.is_finite() || self.duration_hours <= 0.0 {
            return Err(PlanError::InvalidLeg {
                leg:    index,
                reason: format!("duration must be positive (got {} h)", self.duration_hours),
            });
        }
        let mph = self.average_mph();
        if mph > SUSPICIOUS_MPH {
            log::warn!(
                "leg {index} {} -> {} averages {mph:.1} mph",
                self.origin,
                self.destination
            );
        }
        Ok(())
    }

    #[inline]
    pub fn average_mph(&self) -> f64 {
        self.distance_miles / self.duration_hours
    }
}

/// The two legs of a trip, in driving order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRoute {
    /// Current location → pickup.
    pub to_pickup:  Leg,
    /// Pickup → dropoff.
    pub to_dropoff: Leg,
}

impl TripRoute {
    pub fn new(to_pickup: Leg, to_dropoff: Leg) -> Self {
        Self { to_pickup, to_dropoff }
    }

    /// Build a route from a leg list, which must hold exactly two legs.
    pub fn from_legs(legs: Vec<Leg>) -> PlanResult<Self> {
        let count = legs.len();
        let mut it = legs.into_iter();
        match (it.next(), it.next(), it.next()) {
            (Some(to_pickup), Some(to_dropoff), None) => Ok(Self { to_pickup, to_dropoff }),
            _ => Err(PlanError::Parse(format!(
                "a trip route needs exactly 2 legs (current -> pickup, pickup -> dropoff), got {count}"
            ))),
        }
    }

    pub fn legs(&self) -> [&Leg; 2] {
        [&self.to_pickup, &self.to_dropoff]
    }

    pub fn total_miles(&self) -> f64 {
        self.to_pickup.distance_miles + self.to_dropoff.distance_miles
    }

    pub fn total_drive_hours(&self) -> f64 {
        self.to_pickup.duration_hours + self.to_dropoff.duration_hours
    }

    pub fn validate(&self) -> PlanResult<()> {
        for (i, leg) in self.legs().into_iter().enumerate() {
            leg.validate(i)?;
        }
        Ok(())
    }
}
