//! Unit tests for eld-plan.

use eld_core::PlannerConfig;

use crate::{Activity, ActivityKind, ActivityPlanner, FixedTask, Leg, TripRoute};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn route(pickup_mi: f64, pickup_h: f64, dropoff_mi: f64, dropoff_h: f64) -> TripRoute {
    TripRoute::new(
        Leg::new("Dallas, TX", "Tulsa, OK", pickup_mi, pickup_h),
        Leg::new("Tulsa, OK", "Denver, CO", dropoff_mi, dropoff_h),
    )
}

fn planner() -> ActivityPlanner {
    ActivityPlanner::new(PlannerConfig::default()).unwrap()
}

/// (kind, minutes, miles) triples for compact assertions.
fn shape(activities: &[Activity]) -> Vec<(ActivityKind, i64, f64)> {
    activities
        .iter()
        .map(|a| (a.kind, a.duration_min, (a.distance_miles * 1e6).round() / 1e6))
        .collect()
}

const DRIVE: ActivityKind = ActivityKind::Drive;
const PICKUP: ActivityKind = ActivityKind::OnDutyFixed(FixedTask::Pickup);
const DROPOFF: ActivityKind = ActivityKind::OnDutyFixed(FixedTask::Dropoff);
const FUEL: ActivityKind = ActivityKind::OnDutyFixed(FixedTask::Fuel);

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use super::*;

    #[test]
    fn short_trip_has_no_fuel_stop() {
        let acts = planner().plan(&route(30.0, 0.5, 90.0, 1.5)).unwrap();
        assert_eq!(
            shape(&acts),
            vec![
                (DRIVE, 30, 30.0),
                (PICKUP, 60, 0.0),
                (DRIVE, 90, 90.0),
                (DROPOFF, 60, 0.0),
            ]
        );
    }

    #[test]
    fn labels_follow_the_route() {
        let acts = planner().plan(&route(30.0, 0.5, 90.0, 1.5)).unwrap();
        assert_eq!(acts[0].location, "En route to Tulsa, OK");
        assert_eq!(acts[1].location, "Tulsa, OK");
        assert_eq!(acts[2].location, "En route to Denver, CO");
        assert_eq!(acts[3].location, "Denver, CO");
    }

    #[test]
    fn fuel_stop_splits_the_loaded_leg() {
        // Cumulative miles cross 1000 at mile 800 of the 1800-mile leg.
        let acts = planner().plan(&route(200.0, 4.0, 1_800.0, 30.0)).unwrap();
        assert_eq!(
            shape(&acts),
            vec![
                (DRIVE, 240, 200.0),
                (PICKUP, 60, 0.0),
                (DRIVE, 800, 800.0),
                (FUEL, 30, 0.0),
                (DRIVE, 1_000, 1_000.0),
                (DROPOFF, 60, 0.0),
            ]
        );
        assert_eq!(acts[3].location, "Fuel stop");
    }

    #[test]
    fn several_fuel_stops_in_one_leg() {
        let acts = planner().plan(&route(100.0, 2.0, 2_500.0, 50.0)).unwrap();
        assert_eq!(
            shape(&acts),
            vec![
                (DRIVE, 120, 100.0),
                (PICKUP, 60, 0.0),
                (DRIVE, 1_080, 900.0),
                (FUEL, 30, 0.0),
                (DRIVE, 1_200, 1_000.0),
                (FUEL, 30, 0.0),
                (DRIVE, 720, 600.0),
                (DROPOFF, 60, 0.0),
            ]
        );
    }

    #[test]
    fn mark_at_end_of_first_leg_fuels_before_pickup() {
        let acts = planner().plan(&route(1_000.0, 20.0, 100.0, 2.0)).unwrap();
        let kinds: Vec<ActivityKind> = acts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![DRIVE, FUEL, PICKUP, DRIVE, DROPOFF]);
    }

    #[test]
    fn mark_at_end_of_trip_is_skipped() {
        let acts = planner().plan(&route(400.0, 8.0, 600.0, 12.0)).unwrap();
        assert!(acts.iter().all(|a| a.kind != FUEL));
    }

    #[test]
    fn drive_totals_are_preserved() {
        let r = route(333.3, 6.1, 2_222.2, 40.4);
        let acts = planner().plan(&r).unwrap();
        let miles: f64 = acts.iter().map(|a| a.distance_miles).sum();
        let drive_min: i64 = acts.iter().filter(|a| a.kind.is_drive()).map(|a| a.duration_min).sum();
        assert!((miles - r.total_miles()).abs() < 1e-6);
        assert_eq!(drive_min, 366 + 2_424);
    }

    #[test]
    fn custom_fuel_interval() {
        let cfg = PlannerConfig { fuel_interval_miles: 100.0, fuel_stop_hours: 0.25, ..PlannerConfig::default() };
        let acts = ActivityPlanner::new(cfg).unwrap().plan(&route(50.0, 1.0, 200.0, 4.0)).unwrap();
        let fuel: Vec<&Activity> = acts.iter().filter(|a| a.kind == FUEL).collect();
        // Marks at 100 and 200 cumulative miles; 250 is the end of the trip.
        assert_eq!(fuel.len(), 2);
        assert!(fuel.iter().all(|a| a.duration_min == 15));
    }

    #[test]
    fn pickup_always_precedes_dropoff() {
        let acts = planner().plan(&route(1_500.0, 27.0, 1_500.0, 27.0)).unwrap();
        let pickup = acts.iter().position(|a| a.kind == PICKUP).unwrap();
        let dropoff = acts.iter().position(|a| a.kind == DROPOFF).unwrap();
        assert!(pickup < dropoff);
        assert_eq!(dropoff, acts.len() - 1);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;
    use crate::PlanError;

    #[test]
    fn zero_distance_rejected() {
        let err = planner().plan(&route(0.0, 1.0, 90.0, 1.5)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLeg { leg: 0, .. }), "{err}");
    }

    #[test]
    fn negative_duration_rejected() {
        let err = planner().plan(&route(30.0, 0.5, 90.0, -1.5)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLeg { leg: 1, .. }), "{err}");
    }

    #[test]
    fn nan_rejected() {
        assert!(planner().plan(&route(f64::NAN, 0.5, 90.0, 1.5)).is_err());
        assert!(planner().plan(&route(30.0, f64::INFINITY, 90.0, 1.5)).is_err());
    }

    #[test]
    fn oversized_legs_rejected() {
        let err = planner().plan(&route(500.0, 1.0e18, 90.0, 1.5)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLeg { leg: 0, .. }), "{err}");

        let err = planner().plan(&route(30.0, 0.5, 500.0, 240.5)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLeg { leg: 1, .. }), "{err}");

        let err = planner().plan(&route(30.0, 0.5, 1.0e12, 200.0)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLeg { leg: 1, .. }), "{err}");
    }

    #[test]
    fn leg_limits_are_configurable() {
        let cfg = PlannerConfig { max_leg_hours: 2.0, ..PlannerConfig::default() };
        let planner = ActivityPlanner::new(cfg).unwrap();
        assert!(planner.plan(&route(30.0, 0.5, 90.0, 1.5)).is_ok());
        assert!(planner.plan(&route(30.0, 0.5, 120.0, 2.5)).is_err());

        let cfg = PlannerConfig { max_leg_hours: f64::NAN, ..PlannerConfig::default() };
        assert!(matches!(ActivityPlanner::new(cfg), Err(PlanError::Config(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = PlannerConfig { pickup_hours: 0.0, ..PlannerConfig::default() };
        assert!(matches!(ActivityPlanner::new(cfg), Err(PlanError::Config(_))));
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{PlanError, TripRoute, load_legs_reader};

    const CSV: &str = "\
origin,destination,distance_miles,duration_hours\n\
\"Dallas, TX\",\"Oklahoma City, OK\",206.4,3.1\n\
\"Oklahoma City, OK\",\"Denver, CO\",681.2,10.2\n\
";

    #[test]
    fn reads_quoted_labels() {
        let legs = load_legs_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].origin, "Dallas, TX");
        assert_eq!(legs[1].destination, "Denver, CO");
        assert_eq!(legs[1].distance_miles, 681.2);
    }

    #[test]
    fn route_needs_two_legs() {
        let legs = load_legs_reader(Cursor::new(CSV)).unwrap();
        assert!(TripRoute::from_legs(legs.clone()).is_ok());
        let one = legs[..1].to_vec();
        assert!(matches!(TripRoute::from_legs(one), Err(PlanError::Parse(_))));
    }

    #[test]
    fn bad_row_reports_position() {
        let csv = "origin,destination,distance_miles,duration_hours\nA,B,10,1\nB,C,10,0\n";
        let err = load_legs_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLeg { leg: 1, .. }), "{err}");
    }

    #[test]
    fn malformed_number_is_parse_error() {
        let csv = "origin,destination,distance_miles,duration_hours\nA,B,ten,1\n";
        assert!(matches!(load_legs_reader(Cursor::new(csv)), Err(PlanError::Parse(_))));
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use crate::{LegSource, PlanError, Stop, StraightLineEstimator, TripStops};

    fn stops() -> TripStops {
        TripStops {
            current: Stop::new("Dallas, TX", 32.7767, -96.7970),
            pickup:  Stop::new("Oklahoma City, OK", 35.4676, -97.5164),
            dropoff: Stop::new("Denver, CO", 39.7392, -104.9903),
        }
    }

    #[test]
    fn estimates_both_legs() {
        let est = StraightLineEstimator::default();
        let route = est.route(&stops()).unwrap();
        assert_eq!(route.to_pickup.origin, "Dallas, TX");
        assert_eq!(route.to_dropoff.destination, "Denver, CO");
        // Dallas–OKC is ~190 mi great-circle; ×1.2 circuity.
        let d = route.to_pickup.distance_miles;
        assert!((200.0..260.0).contains(&d), "got {d}");
        assert!((route.to_pickup.average_mph() - 55.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_coordinates_rejected() {
        let mut s = stops();
        s.dropoff = Stop::new("Nowhere", 123.0, 0.0);
        let err = StraightLineEstimator::default().route(&s).unwrap_err();
        assert!(matches!(err, PlanError::InvalidLeg { leg: 1, .. }));
    }
}
