//! The `LogWriter` trait implemented by all backend writers.

use crate::{DailyLog, LogResult};

/// Trait implemented by the CSV and JSON writers.
pub trait LogWriter {
    /// Write one day of one trip.
    fn write_log(&mut self, log: &DailyLog) -> LogResult<()>;

    /// Write every day in order.
    fn write_logs(&mut self, logs: &[DailyLog]) -> LogResult<()> {
        logs.iter().try_for_each(|log| self.write_log(log))
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> LogResult<()>;
}
