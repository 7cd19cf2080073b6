//! `eld-core` — foundational types for the `eld` trip planner.
//!
//! This crate is a dependency of every other `eld-*` crate.  It has no
//! `eld-*` dependencies and only a few external ones (`chrono`, `serde`,
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `TripId`                                              |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `Tick` (minutes), `TripClock`, hour/minute conversion |
//! | [`status`]      | `DutyStatus` enum (OFF, SB, D, ON)                    |
//! | [`config`]      | `HosRules`, `PlannerConfig`, `TripConfig`, `Limits`   |
//! | [`error`]       | `EldError`, `EldResult`                               |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CyclePolicy, HosRules, Limits, PlannerConfig, TripConfig};
pub use error::{EldError, EldResult};
pub use geo::GeoPoint;
pub use ids::TripId;
pub use status::DutyStatus;
pub use time::{MINUTES_PER_DAY, MINUTES_PER_HOUR, Tick, TripClock, hours_to_minutes, minutes_to_hours};
