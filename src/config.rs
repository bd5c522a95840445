//! Show configuration
//!
//! All tunables live in plain structs with `const` defaults. The timing
//! defaults are tuned on the installed exhibit and should only change
//! together with on-site testing.

use embassy_time::Duration;
use heapless::Vec;

use crate::error::ConfigError;
use crate::hardware::{Input, Output, TrackId};
use crate::question::{Question, TimingWindow};

/// Maximum number of questions a show can hold
pub const MAX_QUESTIONS: usize = 16;

const DEFAULT_QUESTION_TRACKS: [&str; 9] = ["q1", "q2", "q3", "q4", "q5", "q6", "q7", "q8", "q9"];
const _: () = assert!(DEFAULT_QUESTION_TRACKS.len() <= MAX_QUESTIONS);

/// Timing of the show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowTimings {
    /// Inactivity before the warning track plays
    pub warning_threshold: Duration,
    /// Inactivity before the question is abandoned and the show restarts
    pub hard_timeout: Duration,
    /// How long the marble motors run after an answer
    pub motor_run: Duration,
    /// Length of the answer flourish before the motors start
    pub flourish: Duration,
    /// Pause between two polls of the control loop
    pub poll_interval: Duration,
    /// Edges closer than this to the previous accepted edge are ignored
    pub input_bounce: Duration,
}

impl ShowTimings {
    pub const DEFAULT: Self = Self {
        warning_threshold: Duration::from_secs(30),
        hard_timeout: Duration::from_secs(45),
        motor_run: Duration::from_secs(5),
        // 10 chase passes of 3 phases, 50 ms each
        flourish: Duration::from_millis(1_500),
        poll_interval: Duration::from_millis(5),
        input_bounce: Duration::from_secs(5),
    };

    pub const fn window(&self) -> TimingWindow {
        TimingWindow {
            warning_threshold: self.warning_threshold,
            hard_timeout: self.hard_timeout,
        }
    }
}

impl Default for ShowTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tracks played outside of the questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowTracks {
    /// Acknowledges the start button
    pub start_chime: TrackId,
    pub intro: TrackId,
    /// Nudges an idle guest
    pub warning: TrackId,
    pub finale: TrackId,
}

impl ShowTracks {
    pub const DEFAULT: Self = Self {
        start_chime: TrackId::new("buttonpress"),
        intro: TrackId::new("intro"),
        warning: TrackId::new("inactivitywarning"),
        finale: TrackId::new("finale"),
    };
}

impl Default for ShowTracks {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// BCM pin numbers of the installed wiring
///
/// The core addresses channels by [`Input`] and [`Output`]; hardware
/// backends use this map to resolve them. Pins 2 and 4 are taken by the real-time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pub start_button: u8,
    pub yes_button: u8,
    pub no_button: u8,
    pub start_light: u8,
    pub yes_light: u8,
    pub no_light: u8,
    pub motor_interior_yes: u8,
    pub motor_interior_no: u8,
    pub motor_exterior_yes: u8,
    pub motor_exterior_no: u8,
    /// Data line of the pixel strip
    pub pixels: u8,
}

impl PinMap {
    pub const DEFAULT: Self = Self {
        start_button: 16,
        yes_button: 19,
        no_button: 13,
        start_light: 20,
        yes_light: 26,
        no_light: 25,
        motor_interior_yes: 6,
        motor_interior_no: 5,
        motor_exterior_yes: 12,
        motor_exterior_no: 7,
        pixels: 21,
    };

    pub const fn input(&self, input: Input) -> u8 {
        match input {
            Input::Start => self.start_button,
            Input::Yes => self.yes_button,
            Input::No => self.no_button,
        }
    }

    pub const fn output(&self, output: Output) -> u8 {
        match output {
            Output::StartLight => self.start_light,
            Output::YesLight => self.yes_light,
            Output::NoLight => self.no_light,
            Output::MotorInteriorYes => self.motor_interior_yes,
            Output::MotorInteriorNo => self.motor_interior_no,
            Output::MotorExteriorYes => self.motor_exterior_yes,
            Output::MotorExteriorNo => self.motor_exterior_no,
        }
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete description of one show
#[derive(Debug, Clone)]
pub struct ShowConfig {
    pub timings: ShowTimings,
    pub tracks: ShowTracks,
    /// Questions in the order they are asked
    pub questions: Vec<Question, MAX_QUESTIONS>,
}

impl Default for ShowConfig {
    /// Nine questions `q1`..`q9`, each lighting the indicator of the same rank
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        let questions = DEFAULT_QUESTION_TRACKS
            .iter()
            .enumerate()
            .map(|(index, track)| Question::new(index as u8 + 1, TrackId::new(*track), index))
            .collect();

        Self {
            timings: ShowTimings::DEFAULT,
            tracks: ShowTracks::DEFAULT,
            questions,
        }
    }
}

impl ShowConfig {
    /// Number of questions in the show
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Check the configuration against the number of indicator pixels
    pub fn validate(&self, indicator_count: usize) -> Result<(), ConfigError> {
        if self.questions.is_empty() {
            return Err(ConfigError::NoQuestions);
        }
        if self.timings.warning_threshold >= self.timings.hard_timeout {
            return Err(ConfigError::WarningAfterTimeout);
        }
        // Every wait loop sleeps one poll interval per frame
        if self.timings.poll_interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if let Some(question) = self
            .questions
            .iter()
            .find(|question| question.indicator >= indicator_count)
        {
            return Err(ConfigError::IndicatorOutOfRange {
                question: question.number,
                index: question.indicator,
                available: indicator_count,
            });
        }

        Ok(())
    }
}
