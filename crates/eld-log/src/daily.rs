//! One calendar day of the duty timeline.

use chrono::NaiveDate;
use eld_core::{DutyStatus, MINUTES_PER_DAY, Tick, TripId, minutes_to_hours};
use eld_hos::DutySegment;
use serde::{Deserialize, Serialize};

// ── TripHeader ────────────────────────────────────────────────────────────────

/// Trip-level fields printed on every daily log sheet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripHeader {
    pub trip_id:       TripId,
    pub driver:        String,
    pub co_driver:     String,
    pub carrier:       String,
    pub main_office:   String,
    pub home_terminal: String,
    pub truck_number:  String,
    /// Bill of lading or manifest number; see [`TripHeader::shipping_doc`].
    pub shipping_doc:  Option<String>,
}

impl TripHeader {
    /// The shipping document, or `BOL-<trip id>` when none was given.
    pub fn shipping_doc(&self) -> String {
        match &self.shipping_doc {
            Some(doc) if !doc.trim().is_empty() => doc.clone(),
            _ => format!("BOL-{}", self.trip_id),
        }
    }
}

// ── Remark ────────────────────────────────────────────────────────────────────

/// A location entry in the remarks section of a log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Remark {
    pub tick:     Tick,
    pub location: String,
}

// ── GridEvent ─────────────────────────────────────────────────────────────────

/// A span on the 24-hour log grid, in hours since local midnight.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GridEvent {
    pub status:     DutyStatus,
    pub start_hour: f64,
    pub end_hour:   f64,
}

impl GridEvent {
    #[inline]
    pub fn hours(&self) -> f64 {
        self.end_hour - self.start_hour
    }
}

/// Hours per duty status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct StatusTotals {
    pub off_duty:      f64,
    pub sleeper_berth: f64,
    pub driving:       f64,
    pub on_duty:       f64,
}

impl StatusTotals {
    pub fn get(&self, status: DutyStatus) -> f64 {
        match status {
            DutyStatus::OffDuty      => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving      => self.driving,
            DutyStatus::OnDuty       => self.on_duty,
        }
    }

    fn add(&mut self, status: DutyStatus, hours: f64) {
        match status {
            DutyStatus::OffDuty      => self.off_duty += hours,
            DutyStatus::SleeperBerth => self.sleeper_berth += hours,
            DutyStatus::Driving      => self.driving += hours,
            DutyStatus::OnDuty       => self.on_duty += hours,
        }
    }

    pub fn total(&self) -> f64 {
        self.off_duty + self.sleeper_berth + self.driving + self.on_duty
    }
}

// ── DailyLog ──────────────────────────────────────────────────────────────────

/// The part of a trip that falls on one local calendar day.
///
/// `segments` keep their trip-relative ticks and lie inside
/// `[day_start, day_start + 24 h)`.  Renderers that need hour-of-day spans
/// use [`grid_events`][Self::grid_events].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date:         NaiveDate,
    /// 1-based position in the trip.
    pub day_number:   u32,
    /// Tick of this day's local midnight (not after tick 0 on day 1).
    pub day_start:    Tick,
    pub segments:     Vec<DutySegment>,
    /// The first segment continues one that started the previous day.
    pub carried_over: bool,
    pub miles:        f64,
    pub remarks:      Vec<Remark>,
    pub from:         String,
    pub to:           String,
    pub header:       TripHeader,
}

impl DailyLog {
    #[inline]
    pub fn day_end(&self) -> Tick {
        self.day_start + MINUTES_PER_DAY
    }

    /// Hours since this day's midnight.
    #[inline]
    pub fn hour_of(&self, tick: Tick) -> f64 {
        minutes_to_hours(tick - self.day_start)
    }

    /// The segments as hour-of-day spans covering the whole `[0, 24]` grid.
    /// Time before the trip starts or after it ends is OFF; adjacent spans of
    /// one status are drawn as a single span.
    pub fn grid_events(&self) -> Vec<GridEvent> {
        let mut events: Vec<GridEvent> = Vec::with_capacity(self.segments.len() + 2);
        let mut cursor = self.day_start;

        let spans = self
            .segments
            .iter()
            .map(|s| (s.status, s.start, s.end))
            .chain(std::iter::once((DutyStatus::OffDuty, self.day_end(), self.day_end())));

        for (status, start, end) in spans {
            if start > cursor {
                push_event(&mut events, DutyStatus::OffDuty, self.hour_of(cursor), self.hour_of(start));
            }
            if end > start {
                push_event(&mut events, status, self.hour_of(start), self.hour_of(end));
            }
            cursor = cursor.max(end);
        }
        events
    }

    /// Hours per status over the padded grid; sums to 24.
    pub fn totals(&self) -> StatusTotals {
        let mut totals = StatusTotals::default();
        for event in self.grid_events() {
            totals.add(event.status, event.hours());
        }
        totals
    }

    /// Hours of D plus ON logged this day.
    pub fn on_duty_hours(&self) -> f64 {
        minutes_to_hours(
            self.segments
                .iter()
                .filter(|s| s.status.is_on_duty())
                .map(DutySegment::duration_min)
                .sum(),
        )
    }
}

fn push_event(events: &mut Vec<GridEvent>, status: DutyStatus, start_hour: f64, end_hour: f64) {
    match events.last_mut() {
        Some(last) if last.status == status && last.end_hour == start_hour => last.end_hour = end_hour,
        _ => events.push(GridEvent { status, start_hour, end_hour }),
    }
}

// ── Reassembly ────────────────────────────────────────────────────────────────

/// Concatenate daily logs back into one timeline, joining every segment the
/// segmenter split at midnight.
pub fn reassemble(logs: &[DailyLog]) -> Vec<DutySegment> {
    let mut out: Vec<DutySegment> = Vec::new();
    for log in logs {
        for (i, segment) in log.segments.iter().enumerate() {
            if i == 0 && log.carried_over {
                if let Some(prev) = out.last_mut() {
                    if prev.end == segment.start && prev.status == segment.status {
                        prev.end = segment.end;
                        prev.miles += segment.miles;
                        continue;
                    }
                }
            }
            out.push(segment.clone());
        }
    }
    out
}
