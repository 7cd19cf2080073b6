//! Fluent builder for constructing a [`Scheduler`].

use eld_core::{HosRules, Tick, hours_to_minutes, minutes_to_hours};

use crate::{DutyHistory, Scheduler, SchedulerError, SchedulerResult};

/// How the driver's pre-trip on-duty time is described.
#[derive(Clone, Debug, PartialEq)]
enum PriorDuty {
    /// Total hours, spread evenly over the preceding days.
    Total(f64),
    /// Hours per day, most recent first.
    Recap(Vec<f64>),
}

/// Fluent builder for [`Scheduler`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                          |
/// |-------------------|----------------------------------|
/// | `.rules(r)`       | `HosRules::default()` (70 h / 8) |
/// | `.cycle_used(h)`  | 0 h                              |
/// | `.recap(v)`       | none; overrides `cycle_used`     |
///
/// # Example
///
/// ```rust,ignore
/// let scheduler = SchedulerBuilder::new()
///     .rules(HosRules::sixty_hour_seven_day())
///     .cycle_used(41.5)
///     .build()?;
/// let schedule = scheduler.run(&activities)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct SchedulerBuilder {
    rules: HosRules,
    prior: Option<PriorDuty>,
}

impl SchedulerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(mut self, rules: HosRules) -> Self {
        self.rules = rules;
        self
    }

    /// On-duty hours already used in the current cycle before the trip.
    pub fn cycle_used(mut self, hours: f64) -> Self {
        self.prior = Some(PriorDuty::Total(hours));
        self
    }

    /// Per-day on-duty hours before the trip; `hours[0]` is yesterday.
    pub fn recap(mut self, hours: &[f64]) -> Self {
        self.prior = Some(PriorDuty::Recap(hours.to_vec()));
        self
    }

    /// Validate the rules and prior duty and return a ready [`Scheduler`].
    pub fn build(self) -> SchedulerResult<Scheduler> {
        let limits = self.rules.limits()?;

        let history = match self.prior {
            None => DutyHistory::new(limits.cycle_window),
            Some(PriorDuty::Total(hours)) => {
                if !hours.is_finite() || hours < 0.0 || hours > self.rules.max_cycle_hours {
                    return Err(SchedulerError::Config(format!(
                        "cycle used must be within 0..={} h, got {hours}",
                        self.rules.max_cycle_hours
                    )));
                }
                DutyHistory::with_even_prior(limits.cycle_window, hours_to_minutes(hours))?
            }
            Some(PriorDuty::Recap(days)) => {
                if days.iter().any(|h| !h.is_finite() || *h < 0.0) {
                    return Err(SchedulerError::Config("recap hours must be finite and non-negative".into()));
                }
                let minutes: Vec<i64> = days.iter().map(|&h| hours_to_minutes(h)).collect();
                let history = DutyHistory::from_recap(limits.cycle_window, &minutes)?;
                if history.used_at(Tick::ZERO) > limits.max_cycle {
                    return Err(SchedulerError::Config(format!(
                        "recap totals more than {} h",
                        self.rules.max_cycle_hours
                    )));
                }
                history
            }
        };

        log::debug!(
            "scheduler ready: {} h/{} d cycle, {:.2} h used",
            self.rules.max_cycle_hours,
            self.rules.cycle_days,
            minutes_to_hours(history.used_at(Tick::ZERO))
        );
        Ok(Scheduler::new(limits, history))
    }
}
