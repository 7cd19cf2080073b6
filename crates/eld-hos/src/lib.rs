//! `eld-hos` — Hours-of-Service compliance scheduler for the `eld` trip
//! planner.
//!
//! Takes the ordered activity list from `eld-plan` and lays it onto a
//! trip-relative timeline, inserting breaks and rests whenever a cap binds.
//!
//! # Caps (defaults from `HosRules`)
//!
//! | Cap                         | Default  | On binding              |
//! |-----------------------------|----------|-------------------------|
//! | Driving since break         | 8 h      | 30 min break            |
//! | Driving since rest          | 11 h     | 10 h rest               |
//! | On-duty window              | 14 h     | 10 h rest               |
//! | Rolling cycle               | 70 h / 8 | recovery OFF or restart |
//!
//! When several bind at once the break wins, then the rest, then the cycle.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use eld_hos::{LoggingObserver, SchedulerBuilder};
//!
//! let scheduler = SchedulerBuilder::new().cycle_used(12.0).build()?;
//! let schedule = scheduler.run_with(&activities, &mut LoggingObserver)?;
//! ```

pub mod builder;
pub mod clock;
pub mod error;
pub mod history;
pub mod observer;
pub mod scheduler;
pub mod segment;


pub use builder::SchedulerBuilder;
pub use clock::{ClockState, Constraint};
pub use error::{SchedulerError, SchedulerResult};
pub use history::DutyHistory;
pub use observer::{LoggingObserver, NoopObserver, ScheduleObserver};
pub use scheduler::{Schedule, Scheduler};
pub use segment::DutySegment;
