//! `eld-log` — daily driver logs for the `eld` trip planner.
//!
//! Splits a scheduled duty timeline into one log per local calendar day,
//! writes the logs out, and wires the whole pipeline together.
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`segmenter`] | `DailyLogSegmenter`: midnight splitting and remarks      |
//! | [`daily`]     | `DailyLog`, `TripHeader`, grid events, `reassemble`      |
//! | [`writer`]    | `LogWriter` trait                                        |
//! | [`csv`]       | `CsvLogWriter` (`daily_logs.csv`, `duty_events.csv`)     |
//! | [`json`]      | `JsonLogWriter` (`daily_logs.json`)                      |
//! | [`trip`]      | `TripRequest`, `plan_trip`, batch runners                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                             |
//! |------------|----------------------------------------------------|
//! | `parallel` | Adds `plan_trips_par`, running trips on Rayon.     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use eld_log::{CsvLogWriter, LogWriter, plan_trip};
//!
//! let trip = plan_trip(&request, &TripConfig::default())?;
//! let mut writer = CsvLogWriter::new(Path::new("./output"))?;
//! writer.write_logs(&trip.daily_logs)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod daily;
pub mod error;
pub mod json;
pub mod segmenter;
pub mod trip;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvLogWriter;
pub use daily::{DailyLog, GridEvent, Remark, StatusTotals, TripHeader, reassemble};
pub use error::{LogError, LogResult};
pub use json::JsonLogWriter;
pub use segmenter::DailyLogSegmenter;
pub use trip::{RouteInput, TripLogs, TripRequest, plan_trip, plan_trip_with, plan_trips};
pub use writer::LogWriter;

#[cfg(feature = "parallel")]
pub use trip::plan_trips_par;
