//! Turns a validated [`TripRoute`] into the ordered activity list.

use eld_core::{PlannerConfig, hours_to_minutes};

use crate::{Activity, FixedTask, Leg, PlanError, PlanResult, TripRoute};

/// Tolerance when comparing cumulative miles against a fuel mark.
const MILE_EPSILON: f64 = 1e-9;

/// Builds the activity list for one trip.
///
/// The planner holds no per-trip state; one instance can plan any number of
/// trips, from any number of threads.
#[derive(Clone, Debug)]
pub struct ActivityPlanner {
    config:      PlannerConfig,
    pickup_min:  i64,
    dropoff_min: i64,
    fuel_min:    i64,
}

impl ActivityPlanner {
    /// Validate `config` and pre-compute the fixed durations in minutes.
    pub fn new(config: PlannerConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self {
            pickup_min:  hours_to_minutes(config.pickup_hours),
            dropoff_min: hours_to_minutes(config.dropoff_hours),
            fuel_min:    hours_to_minutes(config.fuel_stop_hours),
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan the trip: drive to pickup, load, drive to dropoff, unload, with a
    /// fuel stop every `fuel_interval_miles` of cumulative driving.
    pub fn plan(&self, route: &TripRoute) -> PlanResult<Vec<Activity>> {
        route.validate()?;
        for (i, leg) in route.legs().into_iter().enumerate() {
            self.check_leg_bounds(i, leg)?;
        }

        let mut activities = Vec::with_capacity(6);
        let mut driven = 0.0;

        self.push_drive(&mut activities, &route.to_pickup, &mut driven, false);
        activities.push(Activity::fixed(
            FixedTask::Pickup,
            self.pickup_min,
            route.to_pickup.destination.clone(),
        ));

        self.push_drive(&mut activities, &route.to_dropoff, &mut driven, true);
        activities.push(Activity::fixed(
            FixedTask::Dropoff,
            self.dropoff_min,
            route.to_dropoff.destination.clone(),
        ));

        log::debug!(
            "planned {} activities over {:.1} mi ({} fuel stops)",
            activities.len(),
            driven,
            activities
                .iter()
                .filter(|a| a.kind == crate::ActivityKind::OnDutyFixed(FixedTask::Fuel))
                .count()
        );
        Ok(activities)
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn check_leg_bounds(&self, index: usize, leg: &Leg) -> PlanResult<()> {
        let cfg = &self.config;
        if leg.duration_hours > cfg.max_leg_hours {
            return Err(PlanError::InvalidLeg {
                leg:    index,
                reason: format!(
                    "duration {} h is over the {} h limit",
                    leg.duration_hours, cfg.max_leg_hours
                ),
            });
        }
        if leg.distance_miles > cfg.max_leg_miles {
            return Err(PlanError::InvalidLeg {
                leg:    index,
                reason: format!(
                    "distance {} mi is over the {} mi limit",
                    leg.distance_miles, cfg.max_leg_miles
                ),
            });
        }
        Ok(())
    }

    /// Append the drive for `leg`, split by fuel stops at every fuel mark the
    /// cumulative mileage crosses.  A mark that falls exactly on the end of
    /// the final leg gets no stop: there is no more driving to fuel for.
    fn push_drive(&self, out: &mut Vec<Activity>, leg: &Leg, driven: &mut f64, final_leg: bool) {
        let interval = self.config.fuel_interval_miles;
        let total_min = hours_to_minutes(leg.duration_hours);
        let leg_start = *driven;
        let leg_end = leg_start + leg.distance_miles;
        let label = en_route_label(&leg.destination);

        let mut used_min = 0;
        let mut used_miles = 0.0;
        let mut mark = ((leg_start / interval).floor() + 1.0) * interval;

        while mark <= leg_end + MILE_EPSILON {
            let at_leg_end = (leg_end - mark).abs() <= MILE_EPSILON;
            if at_leg_end && final_leg {
                break;
            }

            // Minute at which the truck passes the mark, pro rata over the leg.
            let fraction = (mark - leg_start) / leg.distance_miles;
            let mark_min = ((total_min as f64 * fraction).round() as i64).clamp(used_min, total_min);
            let part_min = mark_min - used_min;
            if part_min > 0 {
                let part_miles = (mark - leg_start) - used_miles;
                out.push(Activity::drive(part_min, part_miles, label.clone()));
                used_min = mark_min;
                used_miles += part_miles;
            }
            out.push(Activity::fixed(
                FixedTask::Fuel,
                self.fuel_min,
                self.config.fuel_stop_label.clone(),
            ));
            mark += interval;
        }

        let rest_min = total_min - used_min;
        let rest_miles = leg.distance_miles - used_miles;
        if rest_min > 0 {
            out.push(Activity::drive(rest_min, rest_miles, label));
        } else if rest_miles > MILE_EPSILON {
            // The last mark rounded onto the final minute; keep the mileage.
            if let Some(last) = out.iter_mut().rev().find(|a| a.kind.is_drive()) {
                last.distance_miles += rest_miles;
            }
        }
        *driven = leg_end;
    }
}

fn en_route_label(destination: &str) -> String {
    format!("En route to {destination}")
}
