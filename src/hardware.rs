//! Hardware capabilities consumed by the show
//!
//! The show never talks to GPIO, audio or pixel hardware directly. Every
//! peripheral is reached through one of the traits below, bundled into a
//! single [`HardwareContext`] owned by the session driver.

use core::fmt;

use embassy_time::{Duration, Instant};

use crate::error::HardwareError;

/// Guest-facing push buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Start,
    Yes,
    No,
}

impl Input {
    pub const ALL: [Self; 3] = [Self::Start, Self::Yes, Self::No];

    /// Relay driving the lamp inside this button
    pub const fn light(self) -> Output {
        match self {
            Self::Start => Output::StartLight,
            Self::Yes => Output::YesLight,
            Self::No => Output::NoLight,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Relay-driven outputs: button lamps and marble-run motors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    StartLight,
    YesLight,
    NoLight,
    MotorInteriorYes,
    MotorInteriorNo,
    MotorExteriorYes,
    MotorExteriorNo,
}

impl Output {
    pub const ALL: [Self; 7] = [
        Self::StartLight,
        Self::YesLight,
        Self::NoLight,
        Self::MotorInteriorYes,
        Self::MotorInteriorNo,
        Self::MotorExteriorYes,
        Self::MotorExteriorNo,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(on: bool) -> Self {
        if on { Self::High } else { Self::Low }
    }
}

/// Name of a pre-recorded audio track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(&'static str);

impl TrackId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Which part of the strip the idle animation covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleScope {
    /// Whole strip, question indicators included (pre-show, intro, finale)
    FullStrip,
    /// Decorative strand only; indicators keep showing progress
    Strand,
}

/// Edge-triggered buttons and relay outputs
pub trait DigitalIo {
    /// Enable one-shot edge detection on a button
    fn arm(&mut self, input: Input) -> Result<(), HardwareError>;

    /// Disable edge detection and drop any pending edge
    ///
    /// Must be a no-op on a button that is not armed.
    fn disarm(&mut self, input: Input) -> Result<(), HardwareError>;

    /// Returns `true` once per detected edge; the flag clears on read
    fn detected(&mut self, input: Input) -> Result<bool, HardwareError>;

    /// Drive a relay output
    fn drive(&mut self, output: Output, level: Level) -> Result<(), HardwareError>;
}

/// Single-channel audio playback
pub trait AudioPlayer {
    /// Load and start a track, interrupting whatever is playing
    fn play(&mut self, track: TrackId) -> Result<(), HardwareError>;

    fn stop(&mut self) -> Result<(), HardwareError>;

    fn is_playing(&self) -> bool;
}

/// Pixel-strip animations and question indicators
pub trait Visuals {
    /// Render and push one frame of the waiting animation
    fn render_idle_frame(&mut self, scope: IdleScope, now: Instant) -> Result<(), HardwareError>;

    /// Render and push one frame of the answer flourish
    fn render_highlight_flourish(&mut self, now: Instant) -> Result<(), HardwareError>;

    fn set_indicator(&mut self, index: usize, on: bool) -> Result<(), HardwareError>;

    fn clear_indicators(&mut self) -> Result<(), HardwareError>;
}

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block the control thread for `duration`
    fn delay(&mut self, duration: Duration);
}

/// Process-level recovery
pub trait ProcessControl {
    /// Replace the running process with a fresh invocation of itself,
    /// using the original startup arguments.
    fn restart_self(&mut self) -> !;
}

/// Process-scoped bundle of every peripheral the show drives
pub struct HardwareContext<D, A, V, C> {
    pub io: D,
    pub audio: A,
    pub visuals: V,
    pub clock: C,
}

impl<D, A, V, C> HardwareContext<D, A, V, C>
where
    D: DigitalIo,
    A: AudioPlayer,
    V: Visuals,
    C: Clock,
{
    pub const fn new(io: D, audio: A, visuals: V, clock: C) -> Self {
        Self {
            io,
            audio,
            visuals,
            clock,
        }
    }

    /// Switch the lamp inside a button
    pub fn set_light(&mut self, input: Input, on: bool) -> Result<(), HardwareError> {
        self.io.drive(input.light(), Level::from(on))
    }

    /// Arm a button and light it
    pub fn open_input(&mut self, input: Input) -> Result<(), HardwareError> {
        self.io.arm(input)?;
        self.set_light(input, true)
    }

    /// Disarm a button and switch its lamp off
    pub fn close_input(&mut self, input: Input) -> Result<(), HardwareError> {
        self.io.disarm(input)?;
        self.set_light(input, false)
    }

    /// Put every peripheral into its idle state
    ///
    /// All buttons disarmed, every relay low, indicators dark. Pin levels
    /// may survive a process restart, so a fresh show starts from here.
    pub fn reset(&mut self) -> Result<(), HardwareError> {
        for input in Input::ALL {
            self.io.disarm(input)?;
        }
        for output in Output::ALL {
            self.io.drive(output, Level::Low)?;
        }
        self.visuals.clear_indicators()
    }
}
