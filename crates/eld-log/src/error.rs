//! Error types for eld-log.

use eld_core::EldError;
use eld_hos::SchedulerError;
use eld_plan::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Schedule(#[from] SchedulerError),

    #[error(transparent)]
    Config(#[from] EldError),

    /// The duty timeline handed to the segmenter has a gap or an overlap.
    #[error("timeline error: {0}")]
    Timeline(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, LogError>`.
pub type LogResult<T> = Result<T, LogError>;
