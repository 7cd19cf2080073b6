//! Trip-level configuration.
//!
//! Every regulatory limit and operational constant is a named value here
//! rather than a literal in the algorithm, so an alternative schedule (e.g.
//! 60-hour/7-day) is a different `HosRules` value, not a code change.
//!
//! Human-facing fields are in hours (`f64`), the way carriers write them.
//! The scheduler works on [`Limits`], the validated integer-minute form
//! produced by [`HosRules::limits`].
//!
//! All structs are `#[serde(default)]`: a JSON file naming only
//! `max_cycle_hours` keeps every other default.

use serde::{Deserialize, Serialize};

use crate::time::{MINUTES_PER_DAY, hours_to_minutes};
use crate::{DutyStatus, EldError, EldResult};

// ── CyclePolicy ───────────────────────────────────────────────────────────────

/// How the scheduler recovers cycle hours once the cycle cap binds.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Recompute the trailing window and rest only until enough on-duty time
    /// has rolled off.
    #[default]
    SlidingWindow,
    /// Take a full restart (`restart_hours` off duty), which clears the cycle.
    ///
    /// On-duty time before the restart no longer counts, so a schedule under
    /// this policy can exceed `max_cycle_hours` in a plain trailing window
    /// that straddles the restart.
    Restart,
}

// ── HosRules ──────────────────────────────────────────────────────────────────

/// Hours-of-Service limits for property-carrying drivers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HosRules {
    /// Driving allowed between rests.
    pub max_driving_hours: f64,
    /// Wall-clock window opened by the first on-duty minute after a rest.
    pub max_window_hours: f64,
    /// Driving allowed before a short break is required.
    pub max_driving_since_break_hours: f64,
    /// On-duty hours allowed in the trailing `cycle_days`.
    pub max_cycle_hours: f64,
    /// Length of the rolling cycle, in days.
    pub cycle_days: u32,
    /// Consecutive OFF/SB time that counts as a full rest.
    pub rest_hours: f64,
    /// Consecutive non-driving time that counts as a short break.
    pub break_hours: f64,
    /// Consecutive off-duty time that restarts the cycle.
    pub restart_hours: f64,
    /// Status logged for inserted short breaks (OFF or ON).
    pub break_status: DutyStatus,
    /// Status logged for inserted rests (OFF or SB).
    pub rest_status: DutyStatus,
    pub cycle_policy: CyclePolicy,
}

impl Default for HosRules {
    /// The 70-hour/8-day property-carrying schedule.
    fn default() -> Self {
        Self {
            max_driving_hours:             11.0,
            max_window_hours:              14.0,
            max_driving_since_break_hours: 8.0,
            max_cycle_hours:               70.0,
            cycle_days:                    8,
            rest_hours:                    10.0,
            break_hours:                   0.5,
            restart_hours:                 34.0,
            break_status:                  DutyStatus::OffDuty,
            rest_status:                   DutyStatus::OffDuty,
            cycle_policy:                  CyclePolicy::SlidingWindow,
        }
    }
}

impl HosRules {
    /// The 60-hour/7-day schedule; every other limit is unchanged.
    pub fn sixty_hour_seven_day() -> Self {
        Self {
            max_cycle_hours: 60.0,
            cycle_days:      7,
            ..Self::default()
        }
    }

    /// Validate and convert to integer-minute [`Limits`].
    ///
    /// Caps may be zero (nothing can ever be scheduled, which the scheduler
    /// reports as an unschedulable trip); durations of inserted segments must
    /// be strictly positive.
    pub fn limits(&self) -> EldResult<Limits> {
        let caps = [
            ("max_driving_hours", self.max_driving_hours),
            ("max_window_hours", self.max_window_hours),
            ("max_driving_since_break_hours", self.max_driving_since_break_hours),
            ("max_cycle_hours", self.max_cycle_hours),
        ];
        for (name, value) in caps {
            if !value.is_finite() || value < 0.0 {
                return Err(EldError::Config(format!("{name} must be a finite, non-negative number of hours (got {value})")));
            }
        }

        let durations = [
            ("rest_hours", self.rest_hours),
            ("break_hours", self.break_hours),
            ("restart_hours", self.restart_hours),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value <= 0.0 {
                return Err(EldError::Config(format!("{name} must be a positive number of hours (got {value})")));
            }
        }

        if self.cycle_days == 0 {
            return Err(EldError::Config("cycle_days must be at least 1".into()));
        }
        if self.break_status == DutyStatus::Driving {
            return Err(EldError::Config("break_status cannot be D".into()));
        }
        if !self.rest_status.is_resting() {
            return Err(EldError::Config(format!(
                "rest_status must be OFF or SB (got {})",
                self.rest_status
            )));
        }

        Ok(Limits {
            max_driving:             hours_to_minutes(self.max_driving_hours),
            max_window:              hours_to_minutes(self.max_window_hours),
            max_driving_since_break: hours_to_minutes(self.max_driving_since_break_hours),
            max_cycle:               hours_to_minutes(self.max_cycle_hours),
            cycle_window:            self.cycle_days as i64 * MINUTES_PER_DAY,
            rest:                    hours_to_minutes(self.rest_hours),
            short_break:             hours_to_minutes(self.break_hours),
            restart:                 hours_to_minutes(self.restart_hours),
            break_status:            self.break_status,
            rest_status:             self.rest_status,
            cycle_policy:            self.cycle_policy,
        })
    }
}

// ── Limits ────────────────────────────────────────────────────────────────────

/// Validated [`HosRules`] in whole minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_driving:             i64,
    pub max_window:              i64,
    pub max_driving_since_break: i64,
    pub max_cycle:               i64,
    /// `cycle_days` expressed in minutes.
    pub cycle_window:            i64,
    pub rest:                    i64,
    pub short_break:             i64,
    pub restart:                 i64,
    pub break_status:            DutyStatus,
    pub rest_status:             DutyStatus,
    pub cycle_policy:            CyclePolicy,
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Operational constants used by the activity planner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub pickup_hours:        f64,
    pub dropoff_hours:       f64,
    /// A fuel stop is inserted every time cumulative driven miles cross a
    /// multiple of this value.
    pub fuel_interval_miles: f64,
    pub fuel_stop_hours:     f64,
    pub fuel_stop_label:     String,
    /// Longest leg duration the planner accepts.
    pub max_leg_hours:       f64,
    /// Longest leg distance the planner accepts.
    pub max_leg_miles:       f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            pickup_hours:        1.0,
            dropoff_hours:       1.0,
            fuel_interval_miles: 1_000.0,
            fuel_stop_hours:     0.5,
            fuel_stop_label:     "Fuel stop".to_owned(),
            max_leg_hours:       240.0,
            max_leg_miles:       12_000.0,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> EldResult<()> {
        let positive = [
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
            ("fuel_interval_miles", self.fuel_interval_miles),
            ("fuel_stop_hours", self.fuel_stop_hours),
            ("max_leg_hours", self.max_leg_hours),
            ("max_leg_miles", self.max_leg_miles),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EldError::Config(format!("{name} must be positive (got {value})")));
            }
        }
        Ok(())
    }
}

// ── TripConfig ────────────────────────────────────────────────────────────────

/// Everything a trip calculation needs besides the trip itself.
///
/// Typically loaded from a JSON file by the application crate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    pub rules:   HosRules,
    pub planner: PlannerConfig,
}
