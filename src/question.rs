//! Per-question interaction state machine
//!
//! One question runs through:
//!
//! ```text
//! ArmedActive ──(elapsed > warning)──▶ ArmedWarning
//!      │                                    │
//!      ├──(Yes/No edge)──▶ Resolved(answer) ◀┤
//!      │                                    │
//!      └──────(elapsed > hard timeout)──▶ Expired
//! ```
//!
//! Deciding the next step ([`QuestionMachine::evaluate`]) is pure and only
//! looks at the time and the detected edges; [`QuestionMachine::poll`] wraps
//! it with the hardware reads and the single side effect of the step.

use embassy_time::{Duration, Instant};

#[cfg(feature = "log")]
use log::{debug, info};

use crate::config::ShowConfig;
use crate::error::HardwareError;
use crate::feedback::FeedbackSequence;
use crate::hardware::{
    AudioPlayer, Clock, DigitalIo, HardwareContext, IdleScope, Input, TrackId, Visuals,
};
use crate::session::SessionState;

/// One question of the show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Rank in the show, starting at 1
    pub number: u8,
    pub track: TrackId,
    /// Indicator pixel lit while and after the question is asked
    pub indicator: usize,
}

impl Question {
    pub const fn new(number: u8, track: TrackId, indicator: usize) -> Self {
        Self {
            number,
            track,
            indicator,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Result of one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    Yes,
    No,
    TimedOut,
}

impl From<Answer> for QuestionOutcome {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Yes => Self::Yes,
            Answer::No => Self::No,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionState {
    /// Waiting for an answer
    ArmedActive,
    /// Still waiting, the guest has been nudged
    ArmedWarning,
    Resolved(Answer),
    /// Nobody answered in time
    Expired,
}

impl QuestionState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Expired)
    }
}

/// The two nested inactivity windows of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingWindow {
    pub warning_threshold: Duration,
    pub hard_timeout: Duration,
}

impl TimingWindow {
    pub const DEFAULT: Self = Self {
        warning_threshold: Duration::from_secs(30),
        hard_timeout: Duration::from_secs(45),
    };

    /// `elapsed` is strictly past the warning threshold
    pub fn is_warning(&self, elapsed: Duration) -> bool {
        elapsed > self.warning_threshold
    }

    /// `elapsed` is strictly past the hard timeout
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed > self.hard_timeout
    }
}

impl Default for TimingWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Edges read from the answer buttons during one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectedInputs {
    pub yes: bool,
    pub no: bool,
}

impl DetectedInputs {
    pub const NONE: Self = Self {
        yes: false,
        no: false,
    };
    pub const YES: Self = Self {
        yes: true,
        no: false,
    };
    pub const NO: Self = Self {
        yes: false,
        no: true,
    };
    pub const BOTH: Self = Self { yes: true, no: true };
}

/// What a poll decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Hard timeout reached
    Expire,
    Resolve(Answer),
    /// Play the inactivity warning
    StartWarning,
    /// Keep waiting, render one animation frame
    Wait,
}

/// Drives one question from arming to an answer or a timeout
#[derive(Debug, Clone)]
pub struct QuestionMachine {
    question: Question,
    window: TimingWindow,
    warning_track: TrackId,
    started_at: Instant,
    warning_started: bool,
    state: QuestionState,
}

impl QuestionMachine {
    /// Create a machine whose timing window opened at `started_at`
    ///
    /// Touches no hardware; [`QuestionMachine::start`] is the usual entry.
    pub const fn new(
        question: Question,
        window: TimingWindow,
        warning_track: TrackId,
        started_at: Instant,
    ) -> Self {
        Self {
            question,
            window,
            warning_track,
            started_at,
            warning_started: false,
            state: QuestionState::ArmedActive,
        }
    }

    /// Arm both answer buttons, light them and play the question
    pub fn start<D, A, V, C>(
        question: Question,
        config: &ShowConfig,
        session: &mut SessionState,
        hw: &mut HardwareContext<D, A, V, C>,
    ) -> Result<Self, HardwareError>
    where
        D: DigitalIo,
        A: AudioPlayer,
        V: Visuals,
        C: Clock,
    {
        debug_assert!(
            !session.inputs_armed(),
            "question {} started while another is armed",
            question.number
        );

        hw.open_input(Input::Yes)?;
        hw.open_input(Input::No)?;
        session.set_inputs_armed(true);
        hw.audio.play(question.track)?;

        #[cfg(feature = "log")]
        info!("question {} armed, playing `{}`", question.number, question.track);

        Ok(Self::new(
            question,
            config.timings.window(),
            config.tracks.warning,
            hw.clock.now(),
        ))
    }

    pub const fn question(&self) -> Question {
        self.question
    }

    pub const fn state(&self) -> QuestionState {
        self.state
    }

    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    pub const fn warning_started(&self) -> bool {
        self.warning_started
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Decide the next step from the time and the detected edges
    ///
    /// Checks run in a fixed order: the hard timeout wins over a late
    /// press, Yes wins over No when both arrive in the same poll, and only
    /// then is the warning considered. A terminal machine keeps returning
    /// its terminal step.
    pub fn evaluate(&mut self, now: Instant, inputs: DetectedInputs) -> Step {
        match self.state {
            QuestionState::Resolved(answer) => return Step::Resolve(answer),
            QuestionState::Expired => return Step::Expire,
            QuestionState::ArmedActive | QuestionState::ArmedWarning => {}
        }

        let elapsed = self.elapsed(now);
        let step = if self.window.is_expired(elapsed) {
            Step::Expire
        } else if inputs.yes {
            Step::Resolve(Answer::Yes)
        } else if inputs.no {
            Step::Resolve(Answer::No)
        } else if self.window.is_warning(elapsed) && !self.warning_started {
            Step::StartWarning
        } else {
            Step::Wait
        };

        self.state = match step {
            Step::Expire => QuestionState::Expired,
            Step::Resolve(answer) => QuestionState::Resolved(answer),
            Step::StartWarning => {
                self.warning_started = true;
                QuestionState::ArmedWarning
            }
            Step::Wait => self.state,
        };

        step
    }

    /// Read the answer buttons once and act on the decided step
    pub fn poll<D, A, V, C>(
        &mut self,
        hw: &mut HardwareContext<D, A, V, C>,
    ) -> Result<QuestionState, HardwareError>
    where
        D: DigitalIo,
        A: AudioPlayer,
        V: Visuals,
        C: Clock,
    {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        let now = hw.clock.now();
        let inputs = DetectedInputs {
            yes: hw.io.detected(Input::Yes)?,
            no: hw.io.detected(Input::No)?,
        };

        match self.evaluate(now, inputs) {
            Step::StartWarning => {
                #[cfg(feature = "log")]
                info!("question {} idle, playing warning", self.question.number);
                hw.audio.play(self.warning_track)?;
            }
            Step::Wait => hw.visuals.render_idle_frame(IdleScope::Strand, now)?,
            Step::Expire => {
                #[cfg(feature = "log")]
                info!("question {} expired", self.question.number);
            }
            Step::Resolve(_answer) => {
                #[cfg(feature = "log")]
                debug!("question {} answered {:?}", self.question.number, _answer);
            }
        }

        Ok(self.state)
    }

    /// Cancel the other input and play the feedback for `answer`
    ///
    /// Stops whatever track is still playing (the question or the warning),
    /// disarms and darkens both answer buttons before any effect runs, then
    /// plays the motor feedback. Disarming is idempotent, so resolving twice
    /// is harmless.
    pub fn resolve<D, A, V, C>(
        &mut self,
        answer: Answer,
        session: &mut SessionState,
        hw: &mut HardwareContext<D, A, V, C>,
        feedback: &FeedbackSequence,
    ) -> Result<QuestionOutcome, HardwareError>
    where
        D: DigitalIo,
        A: AudioPlayer,
        V: Visuals,
        C: Clock,
    {
        if hw.audio.is_playing() {
            hw.audio.stop()?;
        }
        hw.close_input(Input::Yes)?;
        hw.close_input(Input::No)?;
        session.set_inputs_armed(false);
        self.state = QuestionState::Resolved(answer);

        feedback.run(answer, hw)?;

        #[cfg(feature = "log")]
        info!("question {} resolved {:?}", self.question.number, answer);

        Ok(answer.into())
    }
}
