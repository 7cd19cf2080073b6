//! Scheduler observer trait for tracing and data collection.

use eld_core::Tick;

use crate::{Constraint, DutySegment};

/// Callbacks invoked by [`Scheduler::run_with`][crate::Scheduler::run_with]
/// as segments are committed.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: count inserted rests
///
/// ```rust,ignore
/// struct RestCounter(usize);
///
/// impl ScheduleObserver for RestCounter {
///     fn on_rest(&mut self, _cause: Constraint, _segment: &DutySegment) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait ScheduleObserver {
    /// Called when work from activity `index` is committed.
    fn on_work(&mut self, _index: usize, _segment: &DutySegment) {}

    /// Called when a break or rest is inserted because `cause` bound.
    fn on_rest(&mut self, _cause: Constraint, _segment: &DutySegment) {}

    /// Called once after the last activity is scheduled.
    fn on_finish(&mut self, _end: Tick) {}
}

/// A [`ScheduleObserver`] that does nothing.
pub struct NoopObserver;

impl ScheduleObserver for NoopObserver {}

/// Emits every committed segment at `trace` level.
pub struct LoggingObserver;

impl ScheduleObserver for LoggingObserver {
    fn on_work(&mut self, index: usize, segment: &DutySegment) {
        log::trace!("activity {index}: {segment}");
    }

    fn on_rest(&mut self, cause: Constraint, segment: &DutySegment) {
        log::trace!("{cause} bound: {segment}");
    }

    fn on_finish(&mut self, end: Tick) {
        log::trace!("schedule ends at {end}");
    }
}
