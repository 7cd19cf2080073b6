//! Trip time model.
//!
//! # Design
//!
//! Time is represented as a signed `Tick` counter of whole minutes relative
//! to the trip start.  Negative ticks describe duty worked before the trip
//! (the prior part of the rolling cycle).  The mapping to calendar time is
//! held in `TripClock`:
//!
//!   local_time = trip_start + tick minutes
//!
//! Using an integer minute as the canonical unit keeps all schedule
//! arithmetic exact: segment boundaries compare with `==`, and re-running a
//! calculation reproduces it bit for bit.  Hours supplied by callers are
//! converted once, at the edge, with [`hours_to_minutes`].
//!
//! Calendar time is local wall-clock time (`NaiveDateTime`); daylight-saving
//! transitions are not modelled, every local day is 1 440 minutes long.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_HOUR: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Convert a duration in hours to whole minutes, rounding to the nearest
/// minute.  A strictly positive duration never rounds down to zero.
#[inline]
pub fn hours_to_minutes(hours: f64) -> i64 {
    let minutes = (hours * MINUTES_PER_HOUR as f64).round() as i64;
    if hours > 0.0 { minutes.max(1) } else { minutes }
}

#[inline]
pub fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / MINUTES_PER_HOUR as f64
}

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Minutes since trip start.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick(pub i64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` minutes after `self`.
    #[inline]
    pub fn offset(self, n: i64) -> Tick {
        Tick(self.0 + n)
    }

    /// Like [`offset`][Self::offset], but `None` on overflow.
    #[inline]
    pub fn checked_offset(self, n: i64) -> Option<Tick> {
        self.0.checked_add(n).map(Tick)
    }

    /// Minutes elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Tick) -> i64 {
        self.0 - earlier.0
    }

    /// Trip-relative offset in hours.
    #[inline]
    pub fn hours(self) -> f64 {
        minutes_to_hours(self.0)
    }
}

impl std::ops::Add<i64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: i64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub<i64> for Tick {
    type Output = Tick;
    #[inline]
    fn sub(self, rhs: i64) -> Tick {
        Tick(self.0 - rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Tick) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "+" };
        let abs = self.0.abs();
        write!(f, "T{}{}:{:02}", sign, abs / MINUTES_PER_HOUR, abs % MINUTES_PER_HOUR)
    }
}

// ── TripClock ─────────────────────────────────────────────────────────────────

/// Converts between trip ticks and local calendar time.
///
/// The start is truncated to the whole minute so that tick 0 and every local
/// midnight are an exact number of minutes apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripClock {
    start: NaiveDateTime,
}

impl TripClock {
    pub fn new(start: NaiveDateTime) -> Self {
        let start = start
            .date()
            .and_hms_opt(start.hour(), start.minute(), 0)
            .unwrap_or(start);
        Self { start }
    }

    /// Local time of tick 0.
    #[inline]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Local time corresponding to `tick`.
    #[inline]
    pub fn at(&self, tick: Tick) -> NaiveDateTime {
        self.start + Duration::minutes(tick.0)
    }

    /// Local calendar date containing `tick`.
    #[inline]
    pub fn date_of(&self, tick: Tick) -> NaiveDate {
        self.at(tick).date()
    }

    /// The tick of local midnight (00:00) opening `date`.
    pub fn midnight_of(&self, date: NaiveDate) -> Tick {
        let midnight = date.and_time(chrono::NaiveTime::MIN);
        Tick((midnight - self.start).num_minutes())
    }

    /// The first local midnight strictly after `tick`.
    pub fn next_midnight(&self, tick: Tick) -> Tick {
        self.midnight_of(self.date_of(tick)) + MINUTES_PER_DAY
    }

    /// Minutes since local midnight, in `0..1440`.
    #[inline]
    pub fn minute_of_day(&self, tick: Tick) -> i64 {
        tick - self.midnight_of(self.date_of(tick))
    }

    /// Zero-based calendar-day index of `tick` relative to the start date.
    pub fn day_index(&self, tick: Tick) -> i64 {
        (self.date_of(tick) - self.start.date()).num_days()
    }
}

impl fmt::Display for TripClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trip clock from {}", self.start.format("%Y-%m-%d %H:%M"))
    }
}
