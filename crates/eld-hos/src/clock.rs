//! The daily Hours-of-Service counters.
//!
//! [`ClockState`] is a value type: [`ClockState::apply`] returns the state
//! after a span of one duty status without touching the original, so the
//! scheduler can ask "what if" before committing a segment.
//!
//! All counters are whole minutes.

use eld_core::{DutyStatus, Limits};
use serde::Serialize;

// ── Constraint ────────────────────────────────────────────────────────────────

/// A cap that can stop an activity.  Declaration order is precedence order
/// when several bind at the same instant.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Cumulative driving since the last qualifying break.
    DrivingSinceBreak,
    /// Driving since the last full rest.
    DrivingSinceRest,
    /// Wall-clock window opened by the first on-duty minute after a rest.
    DutyWindow,
    /// Rolling multi-day on-duty total.
    Cycle,
}

impl Constraint {
    pub fn as_str(self) -> &'static str {
        match self {
            Constraint::DrivingSinceBreak => "driving since break",
            Constraint::DrivingSinceRest  => "driving since rest",
            Constraint::DutyWindow        => "on-duty window",
            Constraint::Cycle             => "cycle",
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ClockState ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct ClockState {
    pub driving_since_rest:  i64,
    /// Minutes since the window opened; `None` until the first on-duty
    /// minute after a rest.
    pub on_duty_window:      Option<i64>,
    pub driving_since_break: i64,
    /// On-duty minutes inside the trailing cycle window.  Refreshed from the
    /// duty history by the scheduler; `apply` only adds to it.
    pub cycle_used:          i64,
    /// Length of the current unbroken OFF/SB run.
    #[serde(skip)]
    off_run:                 i64,
    /// Length of the current unbroken non-driving run.
    #[serde(skip)]
    non_driving_run:         i64,
}

impl ClockState {
    /// A state with `cycle_used` minutes already on the cycle and every daily
    /// counter fresh.
    pub fn with_cycle_used(cycle_used: i64) -> Self {
        Self { cycle_used, ..Self::default() }
    }

    /// Minutes elapsed in the duty window, 0 while it is closed.
    #[inline]
    pub fn window_elapsed(&self) -> i64 {
        self.on_duty_window.unwrap_or(0)
    }

    /// State after `minutes` of `status`, plus the first cap (in precedence
    /// order) the new state exceeds.
    pub fn apply(&self, status: DutyStatus, minutes: i64, limits: &Limits) -> (ClockState, Option<Constraint>) {
        let mut next = *self;
        if minutes <= 0 {
            return (next, None);
        }

        match status {
            DutyStatus::Driving => {
                next.driving_since_rest += minutes;
                next.driving_since_break += minutes;
                next.cycle_used += minutes;
                next.on_duty_window = Some(next.window_elapsed() + minutes);
                next.off_run = 0;
                next.non_driving_run = 0;
            }
            DutyStatus::OnDuty => {
                next.cycle_used += minutes;
                next.on_duty_window = Some(next.window_elapsed() + minutes);
                next.off_run = 0;
                next.non_driving_run += minutes;
            }
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => {
                // The window is wall-clock: it keeps running through breaks.
                next.on_duty_window = next.on_duty_window.map(|w| w + minutes);
                next.off_run += minutes;
                next.non_driving_run += minutes;
            }
        }

        if next.non_driving_run >= limits.short_break {
            next.driving_since_break = 0;
        }
        if next.off_run >= limits.rest {
            next.driving_since_rest = 0;
            next.driving_since_break = 0;
            next.on_duty_window = None;
        }

        let exceeded = next.exceeded(limits);
        (next, exceeded)
    }

    /// First cap in precedence order this state is strictly over.
    pub fn exceeded(&self, limits: &Limits) -> Option<Constraint> {
        if self.driving_since_break > limits.max_driving_since_break {
            Some(Constraint::DrivingSinceBreak)
        } else if self.driving_since_rest > limits.max_driving {
            Some(Constraint::DrivingSinceRest)
        } else if self.window_elapsed() > limits.max_window {
            Some(Constraint::DutyWindow)
        } else if self.cycle_used > limits.max_cycle {
            Some(Constraint::Cycle)
        } else {
            None
        }
    }

    /// Minutes of work the daily caps still allow.  Driving is bounded by all
    /// three daily caps; fixed on-duty work only by the window.
    pub fn daily_budget(&self, driving: bool, limits: &Limits) -> i64 {
        let window = limits.max_window - self.window_elapsed();
        let budget = if driving {
            window
                .min(limits.max_driving - self.driving_since_rest)
                .min(limits.max_driving_since_break - self.driving_since_break)
        } else {
            window
        };
        budget.max(0)
    }

    /// The cap that leaves no room for the next minute of work, by
    /// precedence.  `cycle_room` is the headroom computed from the duty
    /// history.
    pub fn binding(&self, driving: bool, limits: &Limits, cycle_room: i64) -> Option<Constraint> {
        if driving && self.driving_since_break >= limits.max_driving_since_break {
            return Some(Constraint::DrivingSinceBreak);
        }
        if driving && self.driving_since_rest >= limits.max_driving {
            return Some(Constraint::DrivingSinceRest);
        }
        if self.window_elapsed() >= limits.max_window {
            return Some(Constraint::DutyWindow);
        }
        if cycle_room <= 0 {
            return Some(Constraint::Cycle);
        }
        None
    }
}
