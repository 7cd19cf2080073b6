//! The compliance scheduler.
//!
//! # Step loop
//!
//! ```text
//! for activity in activities (in order):
//!   while minutes remain:
//!     room = min(remaining, daily budget, cycle headroom)
//!     room > 0        → Consume(room)   commit a D/ON segment
//!     else, binding:  → Insert(..)      commit a break or rest
//!       since break   → short break
//!       11 h / 14 h   → full rest
//!       cycle         → recovery OFF (sliding) or restart
//!     nothing fits    → Fail            Unschedulable
//! ```
//!
//! A segment that would end more than a year after tick 0 also fails the
//! trip, so absurd durations end in `Unschedulable` instead of looping.
//!
//! Every segment starts where the previous one ended, so the output is
//! contiguous from tick 0.  The loop is pure integer arithmetic over the
//! inputs and produces identical output for identical inputs.

use eld_core::{CyclePolicy, DutyStatus, Limits, MINUTES_PER_DAY, Tick};
use eld_plan::Activity;
use serde::Serialize;

use crate::{
    ClockState, Constraint, DutyHistory, DutySegment, NoopObserver, ScheduleObserver,
    SchedulerError, SchedulerResult,
};

/// Consecutive rests without any work after which the trip is declared
/// unschedulable.
const MAX_IDLE_STEPS: u32 = 16;

/// No segment may end later than this many days after the trip start.
const HORIZON_DAYS: i64 = 366;
const HORIZON: Tick = Tick(HORIZON_DAYS * MINUTES_PER_DAY);

// ── Schedule ──────────────────────────────────────────────────────────────────

/// The scheduler's output: a contiguous duty timeline from tick 0.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schedule {
    pub segments:    Vec<DutySegment>,
    /// Clock counters after the last segment.
    pub final_clock: ClockState,
}

impl Schedule {
    /// Tick at which the last segment ends.
    pub fn end(&self) -> Tick {
        self.segments.last().map_or(Tick::ZERO, |s| s.end)
    }

    #[inline]
    pub fn elapsed_min(&self) -> i64 {
        self.end().0
    }

    pub fn driving_min(&self) -> i64 {
        self.minutes_in(DutyStatus::Driving)
    }

    /// D plus ON minutes.
    pub fn on_duty_min(&self) -> i64 {
        self.driving_min() + self.minutes_in(DutyStatus::OnDuty)
    }

    pub fn minutes_in(&self, status: DutyStatus) -> i64 {
        self.segments
            .iter()
            .filter(|s| s.status == status)
            .map(DutySegment::duration_min)
            .sum()
    }

    pub fn total_miles(&self) -> f64 {
        self.segments.iter().map(|s| s.miles).sum()
    }

    /// Number of inserted OFF/SB segments.
    pub fn rest_count(&self) -> usize {
        self.segments.iter().filter(|s| s.status.is_resting()).count()
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Schedules activities under one set of rules and one prior duty history.
///
/// A `Scheduler` is immutable; `run` clones the prior history, so one
/// instance can schedule any number of trips.  Create via
/// [`SchedulerBuilder`][crate::SchedulerBuilder].
#[derive(Clone, Debug)]
pub struct Scheduler {
    limits: Limits,
    prior:  DutyHistory,
}

impl Scheduler {
    pub(crate) fn new(limits: Limits, prior: DutyHistory) -> Self {
        Self { limits, prior }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// On-duty intervals before tick 0.
    pub fn prior(&self) -> &DutyHistory {
        &self.prior
    }

    pub fn run(&self, activities: &[Activity]) -> SchedulerResult<Schedule> {
        self.run_with(activities, &mut NoopObserver)
    }

    /// Like [`run`][Self::run], reporting each committed segment to
    /// `observer`.
    pub fn run_with<O: ScheduleObserver>(
        &self,
        activities: &[Activity],
        observer:   &mut O,
    ) -> SchedulerResult<Schedule> {
        let mut run = Run {
            limits:   &self.limits,
            clock:    ClockState::with_cycle_used(self.prior.used_at(Tick::ZERO)),
            history:  self.prior.clone(),
            now:      Tick::ZERO,
            segments: Vec::new(),
        };

        for (index, activity) in activities.iter().enumerate() {
            run.schedule(index, activity, observer)?;
        }
        observer.on_finish(run.now);

        log::debug!(
            "scheduled {} activities into {} segments ending at {}",
            activities.len(),
            run.segments.len(),
            run.now
        );
        Ok(Schedule { segments: run.segments, final_clock: run.clock })
    }
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// What the loop does next for the current activity.
#[derive(Clone, Debug, PartialEq)]
enum Step {
    /// Commit this many minutes of the activity.
    Consume(i64),
    /// Insert a non-driving segment.
    Insert {
        cause:   Constraint,
        status:  DutyStatus,
        minutes: i64,
        /// Clear the duty history afterwards.
        restart: bool,
    },
    Fail(String),
}

// ── Run state ─────────────────────────────────────────────────────────────────

struct Run<'a> {
    limits:   &'a Limits,
    clock:    ClockState,
    history:  DutyHistory,
    now:      Tick,
    segments: Vec<DutySegment>,
}

impl Run<'_> {
    fn schedule<O: ScheduleObserver>(
        &mut self,
        index:    usize,
        activity: &Activity,
        observer: &mut O,
    ) -> SchedulerResult<()> {
        if activity.duration_min < 0 {
            return Err(self.unschedulable(index, activity, "negative duration".into()));
        }
        if let Err(reason) = self.fits_horizon(activity.duration_min) {
            return Err(self.unschedulable(index, activity, reason));
        }

        let driving = activity.kind.is_drive();
        let status = activity.kind.status();
        let rate = activity.miles_per_minute();
        let mut remaining = activity.duration_min;
        let mut miles_left = activity.distance_miles;
        let mut idle = 0;

        while remaining > 0 {
            match self.next_step(driving, remaining) {
                Step::Consume(minutes) => {
                    if let Err(reason) = self.fits_horizon(minutes) {
                        return Err(self.unschedulable(index, activity, reason));
                    }
                    // The final piece takes the leftover so the pieces sum exactly.
                    let miles = if minutes == remaining { miles_left } else { rate * minutes as f64 };
                    miles_left -= miles;
                    remaining -= minutes;
                    idle = 0;
                    let segment = self.commit(status, minutes, &activity.location, miles);
                    observer.on_work(index, &segment);
                }
                Step::Insert { cause, status, minutes, restart } => {
                    idle += 1;
                    if idle > MAX_IDLE_STEPS {
                        let reason = format!("{cause} still binds after {MAX_IDLE_STEPS} rests");
                        return Err(self.unschedulable(index, activity, reason));
                    }
                    if let Err(reason) = self.fits_horizon(minutes) {
                        return Err(self.unschedulable(index, activity, reason));
                    }
                    let segment = self.commit(status, minutes, &activity.location, 0.0);
                    if restart {
                        self.history.clear();
                        self.clock.cycle_used = 0;
                    }
                    observer.on_rest(cause, &segment);
                }
                Step::Fail(reason) => return Err(self.unschedulable(index, activity, reason)),
            }
        }
        Ok(())
    }

    fn next_step(&self, driving: bool, remaining: i64) -> Step {
        let limits = self.limits;
        let cycle_room = self.history.headroom(self.now, limits.max_cycle, remaining);
        let room = remaining
            .min(self.clock.daily_budget(driving, limits))
            .min(cycle_room);
        if room > 0 {
            return Step::Consume(room);
        }

        match self.clock.binding(driving, limits, cycle_room) {
            Some(cause @ Constraint::DrivingSinceBreak) => Step::Insert {
                cause,
                status:  self.break_status(),
                minutes: limits.short_break,
                restart: false,
            },
            Some(cause @ (Constraint::DrivingSinceRest | Constraint::DutyWindow)) => Step::Insert {
                cause,
                status:  limits.rest_status,
                minutes: limits.rest,
                restart: false,
            },
            Some(Constraint::Cycle) => self.cycle_step(driving, remaining),
            None => Step::Fail("no work fits but no cap binds".into()),
        }
    }

    fn cycle_step(&self, driving: bool, remaining: i64) -> Step {
        let limits = self.limits;
        match limits.cycle_policy {
            CyclePolicy::Restart => Step::Insert {
                cause:   Constraint::Cycle,
                status:  limits.rest_status,
                minutes: limits.restart,
                restart: true,
            },
            CyclePolicy::SlidingWindow => {
                let session = if driving {
                    limits.max_driving.min(limits.max_window)
                } else {
                    limits.max_window
                };
                let target = remaining.min(session).min(limits.max_cycle);
                match self.history.recovery_rest(self.now, limits.max_cycle, target) {
                    Some(minutes) => Step::Insert {
                        cause: Constraint::Cycle,
                        status: limits.rest_status,
                        minutes,
                        restart: false,
                    },
                    None => Step::Fail(format!(
                        "no off-duty span frees {target} min under the {} min cycle cap",
                        limits.max_cycle
                    )),
                }
            }
        }
    }

    /// `Err` with a reason when `minutes` more from `now` would pass the
    /// planning horizon.
    fn fits_horizon(&self, minutes: i64) -> Result<(), String> {
        match self.now.checked_offset(minutes) {
            Some(end) if end <= HORIZON => Ok(()),
            _ => Err(format!(
                "{minutes} min from {} runs past the {HORIZON_DAYS}-day planning horizon",
                self.now
            )),
        }
    }

    /// The configured break status, or OFF when an on-duty break would not
    /// fit in the window or the cycle.
    fn break_status(&self) -> DutyStatus {
        let limits = self.limits;
        if limits.break_status != DutyStatus::OnDuty {
            return limits.break_status;
        }
        let window_left = limits.max_window - self.clock.window_elapsed();
        let cycle_left = self.history.headroom(self.now, limits.max_cycle, limits.short_break);
        if window_left < limits.short_break || cycle_left < limits.short_break {
            DutyStatus::OffDuty
        } else {
            DutyStatus::OnDuty
        }
    }

    fn commit(&mut self, status: DutyStatus, minutes: i64, location: &str, miles: f64) -> DutySegment {
        let start = self.now;
        let end = start + minutes;

        let (clock, _) = self.clock.apply(status, minutes, self.limits);
        self.clock = clock;
        if status.is_on_duty() {
            self.history.record(start, end);
        }
        self.now = end;
        self.clock.cycle_used = self.history.used_at(end);

        let segment = DutySegment { status, start, end, location: location.to_owned(), miles };
        self.segments.push(segment.clone());
        segment
    }

    fn unschedulable(&self, index: usize, activity: &Activity, reason: String) -> SchedulerError {
        log::warn!("activity {index} ({}) unschedulable at {}: {reason}", activity.kind, self.now);
        SchedulerError::Unschedulable {
            at: self.now,
            activity: format!("#{index} {} at {}", activity.kind, activity.location),
            reason,
        }
    }
}
