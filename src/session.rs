//! Session driver
//!
//! Runs one guest through the show:
//!
//! ```text
//! Preshow ─▶ Intro ─▶ Q1 ─▶ … ─▶ QN ─▶ Finale ─▶ restart
//!                      │           │
//!                      └─(timeout)─┴──────────▶ restart
//! ```
//!
//! Every terminal edge restarts the whole process instead of resetting in
//! memory, so no light, relay or audio state leaks into the next session.

use core::convert::Infallible;

#[cfg(feature = "log")]
use log::{info, warn};

use crate::config::ShowConfig;
use crate::error::{ConfigError, HardwareError};
use crate::feedback::FeedbackSequence;
use crate::frame_scheduler::FrameScheduler;
use crate::hardware::{
    AudioPlayer, Clock, DigitalIo, HardwareContext, IdleScope, Input, ProcessControl, Visuals,
};
use crate::question::{Answer, QuestionMachine, QuestionOutcome, QuestionState};

/// Where the show currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for a guest to press Start
    Preshow,
    Intro,
    /// Asking the question with this number (1-based)
    Question(u8),
    Finale,
}

/// Progress of the running session
///
/// Lives only as long as the process; a restart starts from `Preshow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    stage: Stage,
    inputs_armed: bool,
    question_count: usize,
}

impl SessionState {
    pub const fn new(question_count: usize) -> Self {
        Self {
            stage: Stage::Preshow,
            inputs_armed: false,
            question_count,
        }
    }

    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the Yes/No buttons are armed
    pub const fn inputs_armed(&self) -> bool {
        self.inputs_armed
    }

    /// 0 before the first question, `i` during question `i`, `N + 1` at the finale
    pub const fn question_index(&self) -> usize {
        match self.stage {
            Stage::Preshow | Stage::Intro => 0,
            Stage::Question(number) => number as usize,
            Stage::Finale => self.question_count + 1,
        }
    }

    pub(crate) fn set_inputs_armed(&mut self, armed: bool) {
        self.inputs_armed = armed;
    }

    fn enter(&mut self, stage: Stage) {
        #[cfg(feature = "log")]
        info!("stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

/// Sequences the questions of one show
pub struct SessionDriver<D, A, V, C, P> {
    hardware: HardwareContext<D, A, V, C>,
    process: P,
    config: ShowConfig,
    state: SessionState,
    feedback: FeedbackSequence,
}

impl<D, A, V, C, P> SessionDriver<D, A, V, C, P>
where
    D: DigitalIo,
    A: AudioPlayer,
    V: Visuals,
    C: Clock,
    P: ProcessControl,
{
    /// Create a driver for a validated show
    ///
    /// `indicator_count` is the number of indicator pixels the visuals
    /// provide.
    pub fn new(
        config: ShowConfig,
        indicator_count: usize,
        hardware: HardwareContext<D, A, V, C>,
        process: P,
    ) -> Result<Self, ConfigError> {
        config.validate(indicator_count)?;

        Ok(Self {
            state: SessionState::new(config.question_count()),
            feedback: FeedbackSequence::new(&config.timings),
            hardware,
            process,
            config,
        })
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn config(&self) -> &ShowConfig {
        &self.config
    }

    pub const fn hardware(&self) -> &HardwareContext<D, A, V, C> {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut HardwareContext<D, A, V, C> {
        &mut self.hardware
    }

    /// Run the show once and restart
    ///
    /// Only returns on a hardware fault.
    pub fn run(&mut self) -> Result<Infallible, HardwareError> {
        self.run_preshow()?;
        for number in 1..=self.config.question_count() {
            self.run_question(number)?;
        }
        self.run_finale()?;
        self.restart_session()
    }

    /// Reset the hardware, wait for a guest, then play the intro
    pub fn run_preshow(&mut self) -> Result<(), HardwareError> {
        self.state.enter(Stage::Preshow);
        let hw = &mut self.hardware;
        hw.reset()?;
        hw.open_input(Input::Start)?;

        let mut frames = FrameScheduler::new(self.config.timings.poll_interval);
        loop {
            let now = hw.clock.now();
            hw.visuals.render_idle_frame(IdleScope::FullStrip, now)?;
            if hw.io.detected(Input::Start)? {
                break;
            }
            let frame = frames.tick(now);
            hw.clock.delay(frame.sleep_duration);
        }

        hw.close_input(Input::Start)?;
        hw.audio.play(self.config.tracks.start_chime)?;
        self.feedback.flourish_for(self.config.timings.flourish, hw)?;

        self.state.enter(Stage::Intro);
        self.hardware.audio.play(self.config.tracks.intro)?;
        self.wait_for_audio(IdleScope::FullStrip)?;
        self.hardware.visuals.clear_indicators()
    }

    /// Ask question `number` (1-based) and play its feedback
    ///
    /// Restarts the process if the question times out.
    ///
    /// # Panics
    ///
    /// If `number` is not a question of the show.
    pub fn run_question(&mut self, number: usize) -> Result<Answer, HardwareError> {
        match self.play_question(number)? {
            QuestionOutcome::Yes => Ok(Answer::Yes),
            QuestionOutcome::No => Ok(Answer::No),
            QuestionOutcome::TimedOut => self.restart_session(),
        }
    }

    /// Ask question `number` and report its outcome without restarting
    ///
    /// # Panics
    ///
    /// If `number` is not a question of the show.
    #[allow(clippy::cast_possible_truncation)]
    pub fn play_question(&mut self, number: usize) -> Result<QuestionOutcome, HardwareError> {
        let question = self.config.questions[number - 1];
        self.state.enter(Stage::Question(number as u8));

        let hw = &mut self.hardware;
        hw.visuals.set_indicator(question.indicator, true)?;
        hw.visuals.render_idle_frame(IdleScope::Strand, hw.clock.now())?;

        let mut machine = QuestionMachine::start(question, &self.config, &mut self.state, hw)?;
        let mut frames = FrameScheduler::new(self.config.timings.poll_interval);
        loop {
            match machine.poll(hw)? {
                QuestionState::Resolved(answer) => {
                    return machine.resolve(answer, &mut self.state, hw, &self.feedback);
                }
                QuestionState::Expired => return Ok(QuestionOutcome::TimedOut),
                QuestionState::ArmedActive | QuestionState::ArmedWarning => {}
            }
            let frame = frames.tick(hw.clock.now());
            hw.clock.delay(frame.sleep_duration);
        }
    }

    /// Play the finale over the full-strip rainbow
    pub fn run_finale(&mut self) -> Result<(), HardwareError> {
        self.state.enter(Stage::Finale);
        let now = self.hardware.clock.now();
        self.hardware.visuals.render_idle_frame(IdleScope::FullStrip, now)?;
        self.hardware.audio.play(self.config.tracks.finale)?;
        self.wait_for_audio(IdleScope::FullStrip)
    }

    /// Replace the process with a fresh instance of the show
    pub fn restart_session(&mut self) -> ! {
        #[cfg(feature = "log")]
        warn!(
            "restarting show from {:?} (question {} of {})",
            self.state.stage(),
            self.state.question_index(),
            self.config.question_count()
        );
        self.process.restart_self()
    }

    /// Animate until the current track ends
    fn wait_for_audio(&mut self, scope: IdleScope) -> Result<(), HardwareError> {
        let hw = &mut self.hardware;
        let mut frames = FrameScheduler::new(self.config.timings.poll_interval);
        while hw.audio.is_playing() {
            let now = hw.clock.now();
            hw.visuals.render_idle_frame(scope, now)?;
            let frame = frames.tick(now);
            hw.clock.delay(frame.sleep_duration);
        }
        Ok(())
    }
}
