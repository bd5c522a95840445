//! Simulated exhibit hardware
//!
//! The show runs on its own thread against these fakes. Everything the UI
//! needs to draw lives in one [`Panel`] behind a mutex; button edges go
//! straight into the static [`LATCHES`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration as StdDuration, Instant as StdInstant};

use log::info;
use showrunner::{
    AudioPlayer, Clock, DigitalIo, Duration, HardwareError, Input, InputLatches, Instant, Level,
    Output, OutputDriver, ProcessControl, Rgb, ShowTimings, TrackId,
};

/// Pixels of the simulated strip
pub const STRIP_LEDS: usize = 110;

/// Edge latches of the three guest buttons
pub static LATCHES: InputLatches = InputLatches::new(ShowTimings::DEFAULT.input_bounce);

/// Length of every simulated track
const TRACK_LENGTHS: [(&str, u64); 4] = [
    ("buttonpress", 1_000),
    ("intro", 12_000),
    ("inactivitywarning", 4_000),
    ("finale", 10_000),
];
/// Length of a question track
const QUESTION_TRACK_MS: u64 = 6_000;

#[derive(Debug, Clone, Copy)]
pub struct Playback {
    pub track: TrackId,
    pub until: StdInstant,
}

/// What the window shows
#[derive(Debug)]
pub struct Panel {
    pub levels: [Level; 7],
    pub frame: Vec<Rgb>,
    pub playback: Option<Playback>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            levels: [Level::Low; 7],
            frame: Vec::with_capacity(STRIP_LEDS),
            playback: None,
        }
    }
}

impl Panel {
    /// Track still playing at `now`
    pub fn playing(&self, now: StdInstant) -> Option<TrackId> {
        self.playback
            .filter(|playback| now < playback.until)
            .map(|playback| playback.track)
    }
}

pub type SharedPanel = Arc<Mutex<Panel>>;

/// Lock the panel, ignoring poisoning by a crashed show thread
pub fn lock(panel: &SharedPanel) -> MutexGuard<'_, Panel> {
    panel.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Record a guest press coming from the UI
pub fn press(input: Input) {
    if LATCHES.record_edge(input, Instant::now()) {
        info!("{:?} pressed", input);
    }
}

pub struct SimIo {
    panel: SharedPanel,
}

impl SimIo {
    pub fn new(panel: SharedPanel) -> Self {
        Self { panel }
    }
}

impl DigitalIo for SimIo {
    fn arm(&mut self, input: Input) -> Result<(), HardwareError> {
        LATCHES.arm(input);
        Ok(())
    }

    fn disarm(&mut self, input: Input) -> Result<(), HardwareError> {
        LATCHES.disarm(input);
        Ok(())
    }

    fn detected(&mut self, input: Input) -> Result<bool, HardwareError> {
        Ok(LATCHES.take(input))
    }

    fn drive(&mut self, output: Output, level: Level) -> Result<(), HardwareError> {
        lock(&self.panel).levels[output.index()] = level;
        Ok(())
    }
}

/// Audio player that only tracks how long each file would play
pub struct SimAudio {
    panel: SharedPanel,
    lengths: HashMap<&'static str, StdDuration>,
}

impl SimAudio {
    pub fn new(panel: SharedPanel) -> Self {
        let lengths = TRACK_LENGTHS
            .iter()
            .map(|(name, ms)| (*name, StdDuration::from_millis(*ms)))
            .collect();
        Self { panel, lengths }
    }

    fn length(&self, track: TrackId) -> StdDuration {
        self.lengths
            .get(track.name())
            .copied()
            .unwrap_or(StdDuration::from_millis(QUESTION_TRACK_MS))
    }
}

impl AudioPlayer for SimAudio {
    fn play(&mut self, track: TrackId) -> Result<(), HardwareError> {
        let until = StdInstant::now() + self.length(track);
        lock(&self.panel).playback = Some(Playback { track, until });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HardwareError> {
        lock(&self.panel).playback = None;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        lock(&self.panel).playing(StdInstant::now()).is_some()
    }
}

/// Copies every pushed frame into the panel
pub struct PixelSink {
    panel: SharedPanel,
}

impl PixelSink {
    pub fn new(panel: SharedPanel) -> Self {
        Self { panel }
    }
}

impl OutputDriver for PixelSink {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), HardwareError> {
        let mut panel = lock(&self.panel);
        panel.frame.clear();
        panel.frame.extend_from_slice(colors);
        Ok(())
    }
}

/// Wall clock of the host
pub struct SimClock;

impl Clock for SimClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(StdDuration::from_micros(duration.as_micros()));
    }
}

/// Restarts by re-executing the preview binary
pub struct SimProcess;

impl ProcessControl for SimProcess {
    fn restart_self(&mut self) -> ! {
        let mut args = std::env::args_os();
        let argv0 = args.next().unwrap_or_default();
        let program = std::env::current_exe().unwrap_or_else(|_| argv0.into());
        info!("restarting {}", program.display());

        let mut command = std::process::Command::new(&program);
        command.args(args);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            let err = command.exec();
            log::error!("restart failed: {err}");
            std::process::exit(1)
        }

        #[cfg(not(unix))]
        {
            match command.spawn() {
                Ok(_) => std::process::exit(0),
                Err(err) => {
                    log::error!("restart failed: {err}");
                    std::process::exit(1)
                }
            }
        }
    }
}
