//! Unit tests for eld-log.

use chrono::{NaiveDate, NaiveDateTime};
use eld_core::{DutyStatus, Tick, TripClock, TripId};
use eld_hos::DutySegment;

use crate::{DailyLog, DailyLogSegmenter, TripHeader};

// ── Helpers ───────────────────────────────────────────────────────────────────

use DutyStatus::{Driving as D, OffDuty as OFF, OnDuty as ON};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn seg(status: DutyStatus, start: i64, end: i64, location: &str, miles: f64) -> DutySegment {
    DutySegment { status, start: Tick(start), end: Tick(end), location: location.into(), miles }
}

fn header() -> TripHeader {
    TripHeader {
        trip_id: TripId(7),
        driver: "John Doe".into(),
        carrier: "Doe Transportation".into(),
        ..TripHeader::default()
    }
}

fn segment_from(start: NaiveDateTime, segments: &[DutySegment]) -> Vec<DailyLog> {
    DailyLogSegmenter::new(TripClock::new(start), header(), "Dallas, TX", "Denver, CO")
        .segment(segments)
        .unwrap()
}

/// (status, start, end) of each log's segments.
fn ticks(log: &DailyLog) -> Vec<(DutyStatus, i64, i64)> {
    log.segments.iter().map(|s| (s.status, s.start.0, s.end.0)).collect()
}

// ── Segmenter ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod segmenter {
    use super::*;
    use crate::{LogError, reassemble};

    #[test]
    fn same_day_trip_is_one_log() {
        let logs = segment_from(at(2, 8), &[seg(D, 0, 120, "En route to Denver, CO", 110.0)]);
        assert_eq!(logs.len(), 1);
        let log = &logs[0];
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(log.day_number, 1);
        assert_eq!(log.day_start, Tick(-480));
        assert!(!log.carried_over);
        assert_eq!(log.from, "Dallas, TX");
        assert_eq!(log.to, "Denver, CO");
        assert_eq!(log.miles, 110.0);
    }

    #[test]
    fn midnight_splits_segment_and_miles() {
        let logs = segment_from(at(2, 20), &[seg(D, 0, 300, "I-35", 275.0)]);
        assert_eq!(logs.len(), 2);
        assert_eq!(ticks(&logs[0]), vec![(D, 0, 240)]);
        assert_eq!(ticks(&logs[1]), vec![(D, 240, 300)]);
        assert!((logs[0].miles - 220.0).abs() < 1e-9);
        assert!((logs[1].miles - 55.0).abs() < 1e-9);
        assert!(!logs[0].carried_over);
        assert!(logs[1].carried_over);
        assert_eq!(logs[1].day_start, Tick(240));
        assert_eq!(logs[1].remarks[0].tick, Tick(240));
    }

    #[test]
    fn segment_ending_at_midnight_is_not_split() {
        let logs = segment_from(
            at(2, 23),
            &[seg(OFF, 0, 1_500, "Tulsa, OK", 0.0), seg(D, 1_500, 1_560, "I-44", 50.0)],
        );
        assert_eq!(logs.len(), 3);
        assert_eq!(ticks(&logs[0]), vec![(OFF, 0, 60)]);
        assert_eq!(ticks(&logs[1]), vec![(OFF, 60, 1_500)]);
        assert_eq!(ticks(&logs[2]), vec![(D, 1_500, 1_560)]);
        assert!(logs[1].carried_over);
        assert!(!logs[2].carried_over);
        assert_eq!(logs[2].day_number, 3);
    }

    #[test]
    fn remarks_follow_location_changes() {
        let logs = segment_from(
            at(2, 6),
            &[
                seg(D, 0, 60, "En route to Tulsa, OK", 55.0),
                seg(ON, 60, 120, "Tulsa, OK", 0.0),
                seg(OFF, 120, 150, "Tulsa, OK", 0.0),
                seg(D, 150, 200, "En route to Denver, CO", 45.0),
            ],
        );
        let remarks: Vec<(i64, &str)> = logs[0]
            .remarks
            .iter()
            .map(|r| (r.tick.0, r.location.as_str()))
            .collect();
        assert_eq!(
            remarks,
            vec![(0, "En route to Tulsa, OK"), (60, "Tulsa, OK"), (150, "En route to Denver, CO")]
        );
    }

    #[test]
    fn middle_days_are_labelled_by_their_segments() {
        let logs = segment_from(
            at(2, 20),
            &[
                seg(D, 0, 300, "En route to Tulsa, OK", 270.0),
                seg(OFF, 300, 1_800, "En route to Tulsa, OK", 0.0),
                seg(ON, 1_800, 1_860, "Tulsa, OK", 0.0),
            ],
        );
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].from, "Dallas, TX");
        assert_eq!(logs[1].from, "En route to Tulsa, OK");
        assert_eq!(logs[1].to, "En route to Tulsa, OK");
        assert_eq!(logs[2].to, "Denver, CO");
    }

    #[test]
    fn gaps_and_overlaps_rejected() {
        let segmenter = DailyLogSegmenter::new(TripClock::new(at(2, 8)), header(), "A", "B");
        let gap = [seg_at(0, 60), seg_at(90, 120)];
        let overlap = [seg_at(0, 60), seg_at(30, 120)];
        assert!(matches!(segmenter.segment(&gap), Err(LogError::Timeline(_))));
        assert!(matches!(segmenter.segment(&overlap), Err(LogError::Timeline(_))));
        assert!(segmenter.segment(&[]).unwrap().is_empty());
    }

    fn seg_at(start: i64, end: i64) -> DutySegment {
        seg(OFF, start, end, "A", 0.0)
    }

    #[test]
    fn reassemble_restores_the_timeline() {
        let original = [
            seg(D, 0, 480, "I-35", 440.0),
            seg(OFF, 480, 510, "I-35", 0.0),
            seg(D, 510, 690, "I-35", 165.0),
            seg(OFF, 690, 1_290, "I-35", 0.0),
            seg(D, 1_290, 1_350, "I-35", 55.0),
        ];
        let logs = segment_from(at(2, 14), &original);
        assert_eq!(logs.len(), 2);
        let back = reassemble(&logs);
        assert_eq!(back.len(), original.len());
        for (a, b) in back.iter().zip(&original) {
            assert_eq!((a.status, a.start, a.end, &a.location), (b.status, b.start, b.end, &b.location));
            assert!((a.miles - b.miles).abs() < 1e-9);
        }
    }
}

// ── Daily log ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod daily {
    use super::*;
    use crate::GridEvent;

    #[test]
    fn grid_is_padded_with_off() {
        let logs = segment_from(at(2, 8), &[seg(D, 0, 120, "I-35", 110.0), seg(ON, 120, 180, "Tulsa", 0.0)]);
        let grid = logs[0].grid_events();
        assert_eq!(
            grid,
            vec![
                GridEvent { status: OFF, start_hour: 0.0, end_hour: 8.0 },
                GridEvent { status: D, start_hour: 8.0, end_hour: 10.0 },
                GridEvent { status: ON, start_hour: 10.0, end_hour: 11.0 },
                GridEvent { status: OFF, start_hour: 11.0, end_hour: 24.0 },
            ]
        );
    }

    #[test]
    fn grid_merges_padding_into_adjacent_off() {
        let logs = segment_from(at(2, 8), &[seg(OFF, 0, 60, "Dallas", 0.0), seg(D, 60, 120, "I-35", 50.0)]);
        let grid = logs[0].grid_events();
        assert_eq!(grid[0], GridEvent { status: OFF, start_hour: 0.0, end_hour: 9.0 });
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn totals_cover_the_whole_day() {
        let logs = segment_from(at(2, 20), &[seg(D, 0, 300, "I-35", 275.0), seg(OFF, 300, 960, "I-35", 0.0)]);
        for log in &logs {
            assert!((log.totals().total() - 24.0).abs() < 1e-9);
        }
        assert_eq!(logs[0].totals().driving, 4.0);
        assert_eq!(logs[1].totals().driving, 1.0);
        assert_eq!(logs[1].totals().get(OFF), 23.0);
        assert_eq!(logs[1].on_duty_hours(), 1.0);
    }

    #[test]
    fn header_defaults() {
        assert_eq!(header().shipping_doc(), "BOL-7");
        let with_doc = TripHeader { shipping_doc: Some("SHIP-12345".into()), ..header() };
        assert_eq!(with_doc.shipping_doc(), "SHIP-12345");
        let blank = TripHeader { shipping_doc: Some("  ".into()), ..header() };
        assert_eq!(blank.shipping_doc(), "BOL-7");
    }

    #[test]
    fn every_log_carries_the_header() {
        let logs = segment_from(at(2, 20), &[seg(D, 0, 300, "I-35", 275.0)]);
        assert!(logs.iter().all(|l| l.header == header()));
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use super::*;
    use eld_core::{HosRules, TripConfig};
    use eld_plan::{Leg, PlanError, Stop, TripRoute, TripStops};

    use crate::{LogError, RouteInput, TripRequest, plan_trip, plan_trips, reassemble};

    fn request(pickup: (f64, f64), dropoff: (f64, f64), cycle_used: f64) -> TripRequest {
        TripRequest {
            header: header(),
            start: at(2, 8),
            cycle_used_hours: cycle_used,
            recap: None,
            route: RouteInput::Legs(TripRoute::new(
                Leg::new("Dallas, TX", "Tulsa, OK", pickup.0, pickup.1),
                Leg::new("Tulsa, OK", "Denver, CO", dropoff.0, dropoff.1),
            )),
        }
    }

    #[test]
    fn short_trip_fits_in_one_day() {
        let trip = plan_trip(&request((30.0, 0.5), (90.0, 1.5), 0.0), &TripConfig::default()).unwrap();
        assert_eq!(trip.days(), 1);
        assert_eq!(trip.activities.len(), 4);
        assert_eq!(trip.schedule.segments.len(), 4);
        assert!((trip.total_miles() - 120.0).abs() < 1e-9);
        assert_eq!(trip.driving_hours(), 2.0);
        assert_eq!(trip.on_duty_hours(), 4.0);
        assert_eq!(trip.elapsed_hours(), 4.0);
    }

    #[test]
    fn long_trip_round_trips_through_daily_logs() {
        let trip = plan_trip(&request((250.0, 4.5), (2_000.0, 36.0), 20.0), &TripConfig::default()).unwrap();
        assert!(trip.days() > 2);

        let back = reassemble(&trip.daily_logs);
        assert_eq!(back.len(), trip.schedule.segments.len());
        for (a, b) in back.iter().zip(&trip.schedule.segments) {
            assert_eq!((a.status, a.start, a.end), (b.status, b.start, b.end));
        }

        let daily_miles: f64 = trip.daily_logs.iter().map(|l| l.miles).sum();
        assert!((daily_miles - 2_250.0).abs() < 1e-6);
        for (i, log) in trip.daily_logs.iter().enumerate() {
            assert_eq!(log.day_number as usize, i + 1);
            assert!(log.segments.iter().all(|s| s.start >= log.day_start && s.end <= log.day_end()));
        }
    }

    #[test]
    fn stops_are_resolved_by_the_estimator() {
        let mut req = request((1.0, 1.0), (1.0, 1.0), 0.0);
        req.route = RouteInput::Stops(TripStops {
            current: Stop::new("Dallas, TX", 32.7767, -96.7970),
            pickup:  Stop::new("Oklahoma City, OK", 35.4676, -97.5164),
            dropoff: Stop::new("Denver, CO", 39.7392, -104.9903),
        });
        let trip = plan_trip(&req, &TripConfig::default()).unwrap();
        assert_eq!(trip.route.to_pickup.destination, "Oklahoma City, OK");
        assert_eq!(trip.daily_logs.last().unwrap().to, "Denver, CO");
    }

    #[test]
    fn invalid_leg_is_a_plan_error() {
        let err = plan_trip(&request((0.0, 1.0), (90.0, 1.5), 0.0), &TripConfig::default()).unwrap_err();
        assert!(matches!(err, LogError::Plan(PlanError::InvalidLeg { leg: 0, .. })), "{err}");
    }

    #[test]
    fn absurd_leg_duration_is_rejected() {
        let req = request((30.0, 0.5), (500.0, 1.0e18), 0.0);
        let err = plan_trip(&req, &TripConfig::default()).unwrap_err();
        assert!(matches!(err, LogError::Plan(PlanError::InvalidLeg { leg: 1, .. })), "{err}");
    }

    #[test]
    fn cycle_over_cap_is_a_schedule_error() {
        let err = plan_trip(&request((30.0, 0.5), (90.0, 1.5), 75.0), &TripConfig::default()).unwrap_err();
        assert!(matches!(err, LogError::Schedule(_)), "{err}");
    }

    #[test]
    fn recap_overrides_cycle_used() {
        let mut req = request((30.0, 0.5), (90.0, 1.5), 75.0);
        req.recap = Some(vec![8.0, 8.0]);
        assert!(plan_trip(&req, &TripConfig::default()).is_ok());
    }

    #[test]
    fn sixty_hour_rules_are_honoured() {
        let config = TripConfig { rules: HosRules::sixty_hour_seven_day(), ..TripConfig::default() };
        let trip = plan_trip(&request((30.0, 0.5), (90.0, 1.5), 60.0), &config).unwrap();
        // The full cycle forces a wait before any work.
        assert_eq!(trip.schedule.segments[0].status, OFF);
    }

    #[test]
    fn batch_keeps_request_order() {
        let reqs = vec![
            request((30.0, 0.5), (90.0, 1.5), 0.0),
            request((0.0, 1.0), (90.0, 1.5), 0.0),
            request((250.0, 4.5), (600.0, 11.0), 0.0),
        ];
        let results = plan_trips(&reqs, &TripConfig::default());
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!((results[2].as_ref().unwrap().total_miles() - 850.0).abs() < 1e-9);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        use crate::plan_trips_par;

        let reqs: Vec<TripRequest> = (1..=8)
            .map(|i| request((50.0 * i as f64, i as f64), (300.0 * i as f64, 5.5 * i as f64), 4.0 * i as f64))
            .collect();
        let config = TripConfig::default();
        let seq: Vec<_> = plan_trips(&reqs, &config).into_iter().map(Result::unwrap).collect();
        let par: Vec<_> = plan_trips_par(&reqs, &config).into_iter().map(Result::unwrap).collect();
        assert_eq!(seq, par);
    }

    #[test]
    fn request_parses_from_json() {
        let json = r#"{
            "header": { "trip_id": 42, "driver": "Jane Doe" },
            "start": "2026-03-02T08:00:00",
            "cycle_used_hours": 12.5,
            "route": { "legs": {
                "to_pickup":  { "origin": "Dallas, TX", "destination": "Tulsa, OK",
                                "distance_miles": 257.0, "duration_hours": 4.2 },
                "to_dropoff": { "origin": "Tulsa, OK", "destination": "Denver, CO",
                                "distance_miles": 680.0, "duration_hours": 10.5 }
            } }
        }"#;
        let req: TripRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.header.trip_id, TripId(42));
        assert_eq!(req.header.shipping_doc(), "BOL-42");
        assert_eq!(req.start, at(2, 8));
        assert!(matches!(req.route, RouteInput::Legs(_)));
        assert!(plan_trip(&req, &TripConfig::default()).is_ok());
    }
}

// ── Writers ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod writers {
    use super::*;
    use crate::{CsvLogWriter, JsonLogWriter, LogError, LogWriter};

    fn sample_logs() -> Vec<DailyLog> {
        segment_from(
            at(2, 20),
            &[
                seg(D, 0, 300, "En route to Tulsa, OK", 275.0),
                seg(ON, 300, 360, "Tulsa, OK", 0.0),
            ],
        )
    }

    #[test]
    fn csv_writes_days_and_events() {
        let dir = tempfile::tempdir().unwrap();
        let logs = sample_logs();

        let mut writer = CsvLogWriter::new(dir.path()).unwrap();
        writer.write_logs(&logs).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();

        let mut days = csv::Reader::from_path(dir.path().join("daily_logs.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = days.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "7");
        assert_eq!(&rows[0][2], "2026-03-02");
        assert_eq!(&rows[0][16], "BOL-7");
        assert_eq!(&rows[1][17], "1");
        assert_eq!(&rows[0][18], "20:00 En route to Tulsa, OK");

        let mut events = csv::Reader::from_path(dir.path().join("duty_events.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = events.records().map(Result::unwrap).collect();
        // D split at midnight plus the ON stop.
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][2], "D");
        assert_eq!(&rows[0][3], "20.0000");
        assert_eq!(&rows[0][4], "24.0000");
        assert_eq!(&rows[2][2], "ON");
    }

    #[test]
    fn json_writes_grid_and_totals() {
        let dir = tempfile::tempdir().unwrap();
        let logs = sample_logs();

        let mut writer = JsonLogWriter::new(dir.path()).unwrap();
        writer.write_logs(&logs).unwrap();
        writer.finish().unwrap();

        let text = std::fs::read_to_string(dir.path().join("daily_logs.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let days = value.as_array().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0]["date"], "2026-03-02");
        assert_eq!(days[1]["carried_over"], true);
        assert_eq!(days[1]["segments"][0]["status"], "D");
        assert_eq!(days[0]["totals"]["driving"], 4.0);
        assert!(days[0]["grid"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn json_needs_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(JsonLogWriter::new(&missing), Err(LogError::Io(_))));
    }
}
