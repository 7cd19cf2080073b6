//! The end-to-end pipeline: route → activities → schedule → daily logs.

use chrono::NaiveDateTime;
use eld_core::{TripClock, TripConfig, minutes_to_hours};
use eld_hos::{LoggingObserver, Schedule, SchedulerBuilder};
use eld_plan::{Activity, ActivityPlanner, LegSource, StraightLineEstimator, TripRoute, TripStops};
use serde::{Deserialize, Serialize};

use crate::{DailyLog, DailyLogSegmenter, LogResult, TripHeader};

// ── Request ───────────────────────────────────────────────────────────────────

/// Where the trip's legs come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteInput {
    /// Legs already resolved by a routing service.
    Legs(TripRoute),
    /// Geocoded stops, resolved through a [`LegSource`].
    Stops(TripStops),
}

/// Everything needed to plan one trip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub header:           TripHeader,
    /// Local departure time.
    pub start:            NaiveDateTime,
    /// On-duty hours already used in the current cycle.
    #[serde(default)]
    pub cycle_used_hours: f64,
    /// Per-day on-duty hours before the trip, most recent first.  Takes
    /// precedence over `cycle_used_hours` when present.
    #[serde(default)]
    pub recap:            Option<Vec<f64>>,
    pub route:            RouteInput,
}

// ── Result ────────────────────────────────────────────────────────────────────

/// One planned trip: every intermediate product plus the daily logs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TripLogs {
    pub header:     TripHeader,
    pub route:      TripRoute,
    pub activities: Vec<Activity>,
    pub schedule:   Schedule,
    pub daily_logs: Vec<DailyLog>,
}

impl TripLogs {
    pub fn total_miles(&self) -> f64 {
        self.schedule.total_miles()
    }

    pub fn driving_hours(&self) -> f64 {
        minutes_to_hours(self.schedule.driving_min())
    }

    pub fn on_duty_hours(&self) -> f64 {
        minutes_to_hours(self.schedule.on_duty_min())
    }

    /// Departure to arrival, rests included.
    pub fn elapsed_hours(&self) -> f64 {
        minutes_to_hours(self.schedule.elapsed_min())
    }

    pub fn days(&self) -> usize {
        self.daily_logs.len()
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Plan a trip, resolving stops with the default [`StraightLineEstimator`].
pub fn plan_trip(request: &TripRequest, config: &TripConfig) -> LogResult<TripLogs> {
    plan_trip_with(request, config, &StraightLineEstimator::default())
}

/// Plan a trip, resolving stops through `source`.
pub fn plan_trip_with(
    request: &TripRequest,
    config:  &TripConfig,
    source:  &dyn LegSource,
) -> LogResult<TripLogs> {
    let route = match &request.route {
        RouteInput::Legs(route) => route.clone(),
        RouteInput::Stops(stops) => source.route(stops)?,
    };

    let activities = ActivityPlanner::new(config.planner.clone())?.plan(&route)?;

    let builder = SchedulerBuilder::new().rules(config.rules.clone());
    let builder = match &request.recap {
        Some(days) => builder.recap(days),
        None => builder.cycle_used(request.cycle_used_hours),
    };
    let schedule = builder.build()?.run_with(&activities, &mut LoggingObserver)?;

    let segmenter = DailyLogSegmenter::new(
        TripClock::new(request.start),
        request.header.clone(),
        route.to_pickup.origin.clone(),
        route.to_dropoff.destination.clone(),
    );
    let daily_logs = segmenter.segment(&schedule.segments)?;

    let trip = TripLogs {
        header: request.header.clone(),
        route,
        activities,
        schedule,
        daily_logs,
    };
    log::info!(
        "trip {}: {:.1} mi, {:.2} h driving, {:.2} h elapsed over {} days",
        trip.header.trip_id,
        trip.total_miles(),
        trip.driving_hours(),
        trip.elapsed_hours(),
        trip.days()
    );
    Ok(trip)
}

/// Plan independent trips one after another; results are in request order.
pub fn plan_trips(requests: &[TripRequest], config: &TripConfig) -> Vec<LogResult<TripLogs>> {
    requests.iter().map(|r| plan_trip(r, config)).collect()
}

/// Plan independent trips on Rayon's thread pool; results are in request
/// order and identical to [`plan_trips`].
#[cfg(feature = "parallel")]
pub fn plan_trips_par(requests: &[TripRequest], config: &TripConfig) -> Vec<LogResult<TripLogs>> {
    use rayon::prelude::*;

    requests.par_iter().map(|r| plan_trip(r, config)).collect()
}
