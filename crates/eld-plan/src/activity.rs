//! Atomic activities consumed by the scheduler.
//!
//! An activity is planned work before any Hours-of-Service constraint is
//! applied: "drive 7 h 20 min covering 402 miles" or "one hour loading at
//! the pickup".  The scheduler may split an activity around inserted rests
//! but never reorders activities.

use eld_core::{DutyStatus, minutes_to_hours};
use serde::{Deserialize, Serialize};

/// The fixed on-duty tasks the planner emits.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedTask {
    Pickup,
    Dropoff,
    Fuel,
}

impl FixedTask {
    pub fn as_str(self) -> &'static str {
        match self {
            FixedTask::Pickup  => "pickup",
            FixedTask::Dropoff => "dropoff",
            FixedTask::Fuel    => "fuel",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Drive,
    OnDutyFixed(FixedTask),
}

impl ActivityKind {
    #[inline]
    pub fn is_drive(self) -> bool {
        matches!(self, ActivityKind::Drive)
    }

    /// The duty status this activity is logged under.
    #[inline]
    pub fn status(self) -> DutyStatus {
        match self {
            ActivityKind::Drive          => DutyStatus::Driving,
            ActivityKind::OnDutyFixed(_) => DutyStatus::OnDuty,
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::Drive             => f.write_str("drive"),
            ActivityKind::OnDutyFixed(task) => f.write_str(task.as_str()),
        }
    }
}

/// One planned unit of work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub kind:           ActivityKind,
    /// Planned duration in whole minutes.
    pub duration_min:   i64,
    /// Miles covered; zero for non-driving activities.
    pub distance_miles: f64,
    pub location:       String,
}

impl Activity {
    pub fn drive(duration_min: i64, distance_miles: f64, location: impl Into<String>) -> Self {
        Self {
            kind: ActivityKind::Drive,
            duration_min,
            distance_miles,
            location: location.into(),
        }
    }

    pub fn fixed(task: FixedTask, duration_min: i64, location: impl Into<String>) -> Self {
        Self {
            kind:           ActivityKind::OnDutyFixed(task),
            duration_min,
            distance_miles: 0.0,
            location:       location.into(),
        }
    }

    #[inline]
    pub fn duration_hours(&self) -> f64 {
        minutes_to_hours(self.duration_min)
    }

    /// Miles covered per minute of this activity (0 for fixed tasks).
    #[inline]
    pub fn miles_per_minute(&self) -> f64 {
        if self.duration_min > 0 {
            self.distance_miles / self.duration_min as f64
        } else {
            0.0
        }
    }
}
