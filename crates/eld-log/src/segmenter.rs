//! Splits the duty timeline into per-day logs at local midnight.
//!
//! # Splitting
//!
//! A segment that crosses midnight is cut into two pieces; the second piece
//! opens the next day's log, which is then marked `carried_over`.  Miles are
//! divided in proportion to elapsed time.  Concatenating the logs with
//! [`reassemble`][crate::reassemble] restores the input timeline.
//!
//! # Remarks
//!
//! A remark is recorded at the first segment of each day and whenever the
//! location differs from the preceding segment's.

use eld_core::{Tick, TripClock};
use eld_hos::DutySegment;

use crate::{DailyLog, LogError, LogResult, Remark, TripHeader};

/// Turns a contiguous duty timeline into [`DailyLog`]s.
#[derive(Clone, Debug)]
pub struct DailyLogSegmenter {
    clock:       TripClock,
    header:      TripHeader,
    origin:      String,
    destination: String,
}

impl DailyLogSegmenter {
    /// `origin` and `destination` label the first day's `from` and the last
    /// day's `to`.
    pub fn new(
        clock:       TripClock,
        header:      TripHeader,
        origin:      impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            header,
            origin:      origin.into(),
            destination: destination.into(),
        }
    }

    pub fn clock(&self) -> &TripClock {
        &self.clock
    }

    /// Split `segments` into one log per local calendar day they touch.
    ///
    /// The input must be contiguous; a gap or overlap is a
    /// [`LogError::Timeline`].
    pub fn segment(&self, segments: &[DutySegment]) -> LogResult<Vec<DailyLog>> {
        check_contiguous(segments)?;

        let mut logs: Vec<DailyLog> = Vec::new();
        for segment in segments {
            let mut piece = segment.clone();
            let mut carried = false;
            loop {
                let midnight = self.clock.next_midnight(piece.start);
                let (head, tail) = if piece.end > midnight {
                    let (head, tail) = piece.split_at(midnight);
                    (head, Some(tail))
                } else {
                    (piece, None)
                };

                self.push_piece(&mut logs, head, carried);
                match tail {
                    Some(tail) => {
                        piece = tail;
                        carried = true;
                    }
                    None => break,
                }
            }
        }

        let last = logs.len();
        for log in &mut logs {
            log.from = if log.day_number == 1 {
                self.origin.clone()
            } else {
                first_location(log)
            };
            log.to = if log.day_number as usize == last {
                self.destination.clone()
            } else {
                last_location(log)
            };
            log::debug!(
                "day {} ({}): {} segments, {:.1} mi, {:.2} h on duty",
                log.day_number,
                log.date,
                log.segments.len(),
                log.miles,
                log.on_duty_hours()
            );
        }
        Ok(logs)
    }

    /// Append `piece` to the log for its day, opening a new log when the day
    /// changes.  `carried` marks a piece cut from a segment that began on an
    /// earlier day.
    fn push_piece(&self, logs: &mut Vec<DailyLog>, piece: DutySegment, carried: bool) {
        let date = self.clock.date_of(piece.start);
        if logs.last().is_none_or(|log| log.date != date) {
            logs.push(DailyLog {
                date,
                day_number:   logs.len() as u32 + 1,
                day_start:    self.clock.midnight_of(date),
                segments:     Vec::new(),
                carried_over: carried,
                miles:        0.0,
                remarks:      Vec::new(),
                from:         String::new(),
                to:           String::new(),
                header:       self.header.clone(),
            });
        }

        let Some(log) = logs.last_mut() else { return };
        let moved = log
            .segments
            .last()
            .is_none_or(|prev| prev.location != piece.location);
        if moved {
            log.remarks.push(Remark { tick: piece.start, location: piece.location.clone() });
        }
        log.miles += piece.miles;
        log.segments.push(piece);
    }
}

fn check_contiguous(segments: &[DutySegment]) -> LogResult<()> {
    let mut expected: Option<Tick> = None;
    for (i, s) in segments.iter().enumerate() {
        if s.end <= s.start {
            return Err(LogError::Timeline(format!("segment {i} ({s}) is empty")));
        }
        match expected {
            Some(t) if s.start != t => {
                return Err(LogError::Timeline(format!(
                    "segment {i} starts at {} but the previous one ends at {t}",
                    s.start
                )));
            }
            _ => {}
        }
        expected = Some(s.end);
    }
    Ok(())
}

fn first_location(log: &DailyLog) -> String {
    log.segments.first().map(|s| s.location.clone()).unwrap_or_default()
}

fn last_location(log: &DailyLog) -> String {
    log.segments.last().map(|s| s.location.clone()).unwrap_or_default()
}
