use eld_core::EldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// A leg with a non-positive or non-finite distance or duration.
    #[error("invalid leg {leg}: {reason}")]
    InvalidLeg { leg: usize, reason: String },

    #[error("route parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Config(#[from] EldError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
