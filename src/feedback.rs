//! Answer feedback: flourish, then the marble motors of the chosen side.

use embassy_time::Duration;

#[cfg(feature = "log")]
use log::debug;

use crate::config::ShowTimings;
use crate::error::HardwareError;
use crate::frame_scheduler::FrameScheduler;
use crate::hardware::{AudioPlayer, Clock, DigitalIo, HardwareContext, Level, Output, Visuals};
use crate::question::Answer;

/// Interior and exterior marble-run motors of one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorPair {
    pub interior: Output,
    pub exterior: Output,
}

impl MotorPair {
    pub const fn for_answer(answer: Answer) -> Self {
        match answer {
            Answer::Yes => Self {
                interior: Output::MotorInteriorYes,
                exterior: Output::MotorExteriorYes,
            },
            Answer::No => Self {
                interior: Output::MotorInteriorNo,
                exterior: Output::MotorExteriorNo,
            },
        }
    }

    fn drive<D: DigitalIo>(self, io: &mut D, level: Level) -> Result<(), HardwareError> {
        io.drive(self.interior, level)?;
        io.drive(self.exterior, level)
    }
}

/// Fixed visual and motor sequence played after every answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackSequence {
    /// Flourish shown before the motors start
    pub flourish: Duration,
    /// Motor run time, flourish continues meanwhile
    pub motor_run: Duration,
    pub frame_interval: Duration,
}

impl FeedbackSequence {
    pub const fn new(timings: &ShowTimings) -> Self {
        Self {
            flourish: timings.flourish,
            motor_run: timings.motor_run,
            frame_interval: timings.poll_interval,
        }
    }

    /// Play the whole sequence for `answer`
    pub fn run<D, A, V, C>(
        &self,
        answer: Answer,
        hw: &mut HardwareContext<D, A, V, C>,
    ) -> Result<(), HardwareError>
    where
        D: DigitalIo,
        A: AudioPlayer,
        V: Visuals,
        C: Clock,
    {
        self.flourish_for(self.flourish, hw)?;

        let motors = MotorPair::for_answer(answer);
        #[cfg(feature = "log")]
        debug!("motors {:?} on for {} ms", motors, self.motor_run.as_millis());
        motors.drive(&mut hw.io, Level::High)?;
        self.flourish_for(self.motor_run, hw)?;
        motors.drive(&mut hw.io, Level::Low)
    }

    /// Render flourish frames for `duration`
    pub fn flourish_for<D, A, V, C>(
        &self,
        duration: Duration,
        hw: &mut HardwareContext<D, A, V, C>,
    ) -> Result<(), HardwareError>
    where
        D: DigitalIo,
        A: AudioPlayer,
        V: Visuals,
        C: Clock,
    {
        let mut frames = FrameScheduler::new(self.frame_interval);
        let started_at = hw.clock.now();
        loop {
            let now = hw.clock.now();
            if now.saturating_duration_since(started_at) >= duration {
                return Ok(());
            }
            hw.visuals.render_highlight_flourish(now)?;
            let frame = frames.tick(now);
            hw.clock.delay(frame.sleep_duration);
        }
    }
}

impl Default for FeedbackSequence {
    fn default() -> Self {
        Self::new(&ShowTimings::DEFAULT)
    }
}
