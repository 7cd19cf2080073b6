//! Rolling on-duty history for the multi-day cycle cap.
//!
//! The cycle cap limits on-duty minutes inside any trailing window of
//! `cycle_days` days.  Hours worked before the trip scroll out of that
//! window as the trip goes on, so the history keeps the actual on-duty
//! intervals rather than a single running total.
//!
//! # Prior duty
//!
//! A driver's pre-trip cycle usage arrives as a single number of hours.
//! [`DutyHistory::with_even_prior`] spreads it evenly over the
//! `cycle_days - 1` days before the trip, one block starting at each local
//! midnight, with any remainder on the most recent day.  Callers that know
//! the real per-day recap use [`DutyHistory::from_recap`] instead.

use std::collections::VecDeque;

use eld_core::{MINUTES_PER_DAY, Tick};

use crate::{SchedulerError, SchedulerResult};

#[derive(Clone, Debug, PartialEq)]
pub struct DutyHistory {
    /// Disjoint, ascending, half-open on-duty intervals.
    intervals: VecDeque<(Tick, Tick)>,
    /// Trailing window length in minutes.
    window:    i64,
}

impl DutyHistory {
    pub fn new(window: i64) -> Self {
        Self { intervals: VecDeque::new(), window }
    }

    /// History with `used` minutes spread over the days before tick 0.
    pub fn with_even_prior(window: i64, used: i64) -> SchedulerResult<Self> {
        let mut history = Self::new(window);
        if used <= 0 {
            return Ok(history);
        }

        let days = window / MINUTES_PER_DAY - 1;
        if days <= 0 {
            // One-day cycle: everything sits just before the trip.
            history.record(Tick(-used), Tick::ZERO);
            return Ok(history);
        }

        let per_day = used / days;
        let remainder = used % days;
        if per_day + remainder > MINUTES_PER_DAY {
            return Err(SchedulerError::Config(format!(
                "{used} prior minutes do not fit in {days} days"
            )));
        }

        // Oldest first so intervals stay ascending.
        for day in (1..=days).rev() {
            let minutes = if day == 1 { per_day + remainder } else { per_day };
            let start = Tick(-day * MINUTES_PER_DAY);
            history.record(start, start + minutes);
        }
        Ok(history)
    }

    /// History from explicit per-day minutes; `days_ago[0]` is yesterday.
    pub fn from_recap(window: i64, days_ago: &[i64]) -> SchedulerResult<Self> {
        let max_days = (window / MINUTES_PER_DAY - 1).max(0) as usize;
        if days_ago.len() > max_days {
            return Err(SchedulerError::Config(format!(
                "recap has {} days; only {max_days} fit in the cycle window",
                days_ago.len()
            )));
        }

        let mut history = Self::new(window);
        for (i, &minutes) in days_ago.iter().enumerate().rev() {
            if !(0..=MINUTES_PER_DAY).contains(&minutes) {
                return Err(SchedulerError::Config(format!(
                    "recap day {} has {minutes} on-duty minutes",
                    i + 1
                )));
            }
            let start = Tick(-(i as i64 + 1) * MINUTES_PER_DAY);
            history.record(start, start + minutes);
        }
        Ok(history)
    }

    #[inline]
    pub fn window(&self) -> i64 {
        self.window
    }

    pub fn intervals(&self) -> impl Iterator<Item = (Tick, Tick)> + '_ {
        self.intervals.iter().copied()
    }

    /// Append an on-duty interval.  Intervals must arrive in time order;
    /// one that touches the previous interval extends it.
    pub fn record(&mut self, start: Tick, end: Tick) {
        if end <= start {
            return;
        }
        match self.intervals.back_mut() {
            Some(last) if last.1 == start => last.1 = end,
            _ => self.intervals.push_back((start, end)),
        }
        self.prune(end);
    }

    /// Forget everything (a full restart).
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// On-duty minutes inside `[t - window, t)`.
    pub fn used_at(&self, t: Tick) -> i64 {
        let from = t - self.window;
        self.intervals
            .iter()
            .map(|&(s, e)| (e.min(t) - s.max(from)).max(0))
            .sum()
    }

    /// Largest `x` in `[0, upto]` such that `x` more on-duty minutes starting
    /// at `now` never push the trailing total over `cap`.
    ///
    /// `now` must not precede the last recorded interval.  The trailing
    /// total after `x` minutes is nondecreasing in `x`, so its end value
    /// decides and a binary search finds the boundary.
    pub fn headroom(&self, now: Tick, cap: i64, upto: i64) -> i64 {
        let fits = |x: i64| {
            now.checked_offset(x)
                .is_some_and(|end| x <= cap - self.used_at(end))
        };
        if upto <= 0 || !fits(0) {
            return 0;
        }
        if fits(upto) {
            return upto;
        }
        let (mut lo, mut hi) = (0, upto);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if fits(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Shortest off-duty span starting at `now` after which `target` on-duty
    /// minutes fit under `cap`.  `None` if no span can achieve it.
    pub fn recovery_rest(&self, now: Tick, cap: i64, target: i64) -> Option<i64> {
        if target <= 0 || target > cap {
            return None;
        }
        let enough = |r: i64| self.headroom(now + r, cap, target) >= target;
        // Everything recorded before `now` has left the window by `now + window`.
        if !enough(self.window) {
            return None;
        }
        if enough(1) {
            return Some(1);
        }
        let (mut lo, mut hi) = (1, self.window);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if enough(mid) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        Some(hi)
    }

    fn prune(&mut self, now: Tick) {
        let from = now - self.window;
        while self.intervals.front().is_some_and(|&(_, e)| e <= from) {
            self.intervals.pop_front();
        }
    }
}
