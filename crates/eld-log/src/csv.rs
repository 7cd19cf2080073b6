//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `daily_logs.csv`: one row per day with header fields and totals
//! - `duty_events.csv`: one row per duty segment, in hours of the day

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::LogWriter;
use crate::{DailyLog, LogResult};

/// Writes daily logs to two CSV files.
pub struct CsvLogWriter {
    days:     Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

impl CsvLogWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> LogResult<Self> {
        let mut days = Writer::from_path(dir.join("daily_logs.csv"))?;
        days.write_record([
            "trip_id", "day", "date", "from", "to", "miles",
            "off_hours", "sb_hours", "d_hours", "on_hours",
            "driver", "co_driver", "carrier", "main_office", "home_terminal",
            "truck_number", "shipping_doc", "carried_over", "remarks",
        ])?;

        let mut events = Writer::from_path(dir.join("duty_events.csv"))?;
        events.write_record([
            "trip_id", "day", "status", "start_hour", "end_hour", "location", "miles",
        ])?;

        Ok(Self { days, events, finished: false })
    }
}

impl LogWriter for CsvLogWriter {
    fn write_log(&mut self, log: &DailyLog) -> LogResult<()> {
        let totals = log.totals();
        let remarks = log
            .remarks
            .iter()
            .map(|r| {
                let minutes = r.tick - log.day_start;
                format!("{:02}:{:02} {}", minutes / 60, minutes % 60, r.location)
            })
            .collect::<Vec<_>>()
            .join("; ");
        let h = &log.header;

        self.days.write_record(&[
            h.trip_id.to_string(),
            log.day_number.to_string(),
            log.date.to_string(),
            log.from.clone(),
            log.to.clone(),
            format!("{:.1}", log.miles),
            format!("{:.2}", totals.off_duty),
            format!("{:.2}", totals.sleeper_berth),
            format!("{:.2}", totals.driving),
            format!("{:.2}", totals.on_duty),
            h.driver.clone(),
            h.co_driver.clone(),
            h.carrier.clone(),
            h.main_office.clone(),
            h.home_terminal.clone(),
            h.truck_number.clone(),
            h.shipping_doc(),
            (log.carried_over as u8).to_string(),
            remarks,
        ])?;

        for s in &log.segments {
            self.events.write_record(&[
                h.trip_id.to_string(),
                log.day_number.to_string(),
                s.status.to_string(),
                format!("{:.4}", log.hour_of(s.start)),
                format!("{:.4}", log.hour_of(s.end)),
                s.location.clone(),
                format!("{:.2}", s.miles),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> LogResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.days.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
