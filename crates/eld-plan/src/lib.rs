//! `eld-plan` — trip legs and the activity planner.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`leg`]       | `Leg`, `TripRoute`                                        |
//! | [`activity`]  | `Activity`, `ActivityKind`, `FixedTask`                   |
//! | [`planner`]   | `ActivityPlanner`                                         |
//! | [`loader`]    | `load_route_csv`, `load_legs_reader`                      |
//! | [`router`]    | `LegSource` trait, `StraightLineEstimator`, `TripStops`   |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                              |
//!
//! # Activity order
//!
//! ```text
//! Drive(current → pickup)  [fuel stops split the drive every N miles]
//! OnDuty(pickup)
//! Drive(pickup → dropoff)  [fuel stops …]
//! OnDuty(dropoff)
//! ```
//!
//! Fuel marks are counted on cumulative miles across both legs, so the
//! first stop of the loaded leg may come well before 1 000 miles past the
//! pickup.

pub mod activity;
pub mod error;
pub mod leg;
pub mod loader;
pub mod planner;
pub mod router;

#[cfg(test)]
mod tests;

pub use activity::{Activity, ActivityKind, FixedTask};
pub use error::{PlanError, PlanResult};
pub use leg::{Leg, TripRoute};
pub use loader::{load_legs_reader, load_route_csv};
pub use planner::ActivityPlanner;
pub use router::{LegSource, Stop, StraightLineEstimator, TripStops};
