use eld_core::{EldError, Tick};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Rules(#[from] EldError),

    /// The simulation stopped making progress on an activity.
    #[error("trip cannot be scheduled at {at} ({activity}): {reason}")]
    Unschedulable {
        at:       Tick,
        activity: String,
        reason:   String,
    },
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
