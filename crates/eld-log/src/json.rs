//! JSON output backend.
//!
//! Buffers every log and writes `daily_logs.json` (a pretty-printed array)
//! on [`finish`][LogWriter::finish].  Each entry carries the log itself plus
//! its grid events and status totals so a renderer needs nothing else.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::writer::LogWriter;
use crate::{DailyLog, GridEvent, LogResult, StatusTotals};

#[derive(Serialize)]
struct LogEntry {
    #[serde(flatten)]
    log:    DailyLog,
    grid:   Vec<GridEvent>,
    totals: StatusTotals,
}

/// Writes daily logs to `daily_logs.json`.
pub struct JsonLogWriter {
    path:     PathBuf,
    entries:  Vec<LogEntry>,
    finished: bool,
}

impl JsonLogWriter {
    /// Check that `dir` exists; the file is created on `finish`.
    pub fn new(dir: &Path) -> LogResult<Self> {
        if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory {} does not exist", dir.display()),
            )
            .into());
        }
        Ok(Self {
            path:     dir.join("daily_logs.json"),
            entries:  Vec::new(),
            finished: false,
        })
    }
}

impl LogWriter for JsonLogWriter {
    fn write_log(&mut self, log: &DailyLog) -> LogResult<()> {
        self.entries.push(LogEntry {
            grid:   log.grid_events(),
            totals: log.totals(),
            log:    log.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> LogResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        let mut out = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut out, &self.entries)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}
