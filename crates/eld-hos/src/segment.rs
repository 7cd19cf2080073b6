//! The scheduler's output unit.

use eld_core::{DutyStatus, Tick, minutes_to_hours};
use serde::{Deserialize, Serialize};

/// A contiguous span of one duty status.
///
/// `start`/`end` are trip-relative ticks, half-open `[start, end)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DutySegment {
    pub status:   DutyStatus,
    pub start:    Tick,
    pub end:      Tick,
    pub location: String,
    /// Miles covered; nonzero only for `D`.
    pub miles:    f64,
}

impl DutySegment {
    pub fn new(status: DutyStatus, start: Tick, end: Tick, location: impl Into<String>) -> Self {
        Self { status, start, end, location: location.into(), miles: 0.0 }
    }

    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end - self.start
    }

    #[inline]
    pub fn duration_hours(&self) -> f64 {
        minutes_to_hours(self.duration_min())
    }

    #[inline]
    pub fn start_hours(&self) -> f64 {
        self.start.hours()
    }

    #[inline]
    pub fn end_hours(&self) -> f64 {
        self.end.hours()
    }

    /// `true` if `tick` falls inside `[start, end)`.
    #[inline]
    pub fn contains(&self, tick: Tick) -> bool {
        self.start <= tick && tick < self.end
    }

    /// Split at `at` (which must lie strictly inside the segment).  Miles
    /// are divided by elapsed fraction; the second half takes the remainder
    /// so the two halves sum exactly to the original.
    pub fn split_at(&self, at: Tick) -> (DutySegment, DutySegment) {
        debug_assert!(self.start < at && at < self.end, "split point outside segment");
        let fraction = (at - self.start) as f64 / self.duration_min() as f64;
        let first_miles = self.miles * fraction;
        let first = DutySegment {
            end:   at,
            miles: first_miles,
            ..self.clone()
        };
        let second = DutySegment {
            start: at,
            miles: self.miles - first_miles,
            ..self.clone()
        };
        (first, second)
    }
}

impl std::fmt::Display for DutySegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3} {}..{} {}", self.status, self.start, self.end, self.location)?;
        if self.miles > 0.0 {
            write!(f, " ({:.1} mi)", self.miles)?;
        }
        Ok(())
    }
}
