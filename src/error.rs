use thiserror::Error;

use crate::hardware::{Input, Output, TrackId};

/// Peripheral failure
///
/// None of these are recovered in-process; they propagate to the entry
/// point and the external supervisor restarts the show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HardwareError {
    #[error("input {0:?} is unavailable")]
    InputUnavailable(Input),
    #[error("output {0:?} is unavailable")]
    OutputUnavailable(Output),
    #[error("audio track `{0}` could not be played")]
    TrackUnavailable(TrackId),
    #[error("audio device is unavailable")]
    AudioDevice,
    #[error("pixel output failed")]
    PixelOutput,
    #[error("strip has no indicator {0}")]
    NoSuchIndicator(usize),
    #[error("serial write failed")]
    SerialWrite,
}

/// Rejected show configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("show has no questions")]
    NoQuestions,
    #[error("warning threshold must be shorter than the hard timeout")]
    WarningAfterTimeout,
    #[error("poll interval must be longer than zero")]
    ZeroPollInterval,
    #[error("question {question} uses indicator {index}, strip has {available}")]
    IndicatorOutOfRange {
        question: u8,
        index: usize,
        available: usize,
    },
    #[error("strip layout needs {required} pixels, buffer holds {capacity}")]
    LayoutTooLarge { required: usize, capacity: usize },
}
