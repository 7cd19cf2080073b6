//! Duty status enum shared by the scheduler and the daily log.
//!
//! The four statuses are the four rows of the regulatory 24-hour grid, in
//! grid order: OFF, SB, D, ON.

use serde::{Deserialize, Serialize};

/// A driver's duty status for one span of time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub enum DutyStatus {
    /// Off duty.
    #[default]
    #[serde(rename = "OFF", alias = "off_duty")]
    OffDuty,
    /// Sleeper berth.
    #[serde(rename = "SB", alias = "sleeper")]
    SleeperBerth,
    /// Driving.
    #[serde(rename = "D", alias = "driving")]
    Driving,
    /// On duty, not driving.
    #[serde(rename = "ON", alias = "on_duty")]
    OnDuty,
}

impl DutyStatus {
    /// All statuses in grid-row order.
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    /// `true` for ON and D, the statuses that count against the cycle and
    /// open the duty window.
    #[inline]
    pub fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }

    /// `true` for OFF and SB, the statuses that accumulate toward a rest.
    #[inline]
    pub fn is_resting(self) -> bool {
        !self.is_on_duty()
    }

    /// Grid row index (0 = OFF … 3 = ON).
    #[inline]
    pub fn row(self) -> usize {
        self as usize
    }

    /// Short label as printed on the paper log.
    pub fn as_str(self) -> &'static str {
        match self {
            DutyStatus::OffDuty      => "OFF",
            DutyStatus::SleeperBerth => "SB",
            DutyStatus::Driving      => "D",
            DutyStatus::OnDuty       => "ON",
        }
    }
}

impl std::fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
