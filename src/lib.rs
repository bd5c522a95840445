#![no_std]

pub mod bounds;
pub mod color;
pub mod config;
pub mod effect;
pub mod error;
pub mod feedback;
pub mod frame_scheduler;
pub mod hardware;
pub mod hour_signal;
pub mod latch;
pub mod math8;
pub mod question;
pub mod session;
pub mod visuals;

pub use bounds::{RenderingBounds, StripLayout};
pub use config::{PinMap, ShowConfig, ShowTimings, ShowTracks};
pub use error::{ConfigError, HardwareError};
pub use feedback::{FeedbackSequence, MotorPair};
pub use frame_scheduler::FrameScheduler;
pub use hardware::{
    AudioPlayer, Clock, DigitalIo, HardwareContext, IdleScope, Input, Level, Output,
    ProcessControl, TrackId, Visuals,
};
pub use hour_signal::{HourSignal, SerialLine, signal_byte};
pub use latch::{EdgeLatch, InputLatches};
pub use question::{
    Answer, DetectedInputs, Question, QuestionMachine, QuestionOutcome, QuestionState, Step,
    TimingWindow,
};
pub use session::{SessionDriver, SessionState, Stage};
pub use visuals::StripVisuals;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`StripVisuals`] is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), HardwareError>;
}
