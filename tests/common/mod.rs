//! Simulated exhibit bench shared by the integration tests.
//!
//! Every fake peripheral holds a handle to one [`World`]. Time only moves
//! when the code under test calls `Clock::delay`, so a 45 s timeout runs in
//! microseconds. Button presses are scripted as rising edges at absolute
//! times and flow through the real [`InputLatches`].

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use showrunner::{
    AudioPlayer, Clock, DigitalIo, Duration, HardwareContext, HardwareError, IdleScope, Input,
    InputLatches, Instant, Level, Output, ProcessControl, SessionDriver, ShowConfig, TrackId,
    Visuals,
};

/// Default length of a track without an explicit duration
pub const DEFAULT_TRACK_MS: u64 = 3_000;
/// Indicator pixels provided by the bench visuals
pub const INDICATORS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Arm(Input),
    Disarm(Input),
    Drive(Output, Level),
    Play(&'static str),
    Stop,
    Flourish,
    Indicator(usize, bool),
    ClearIndicators,
}

/// Payload of the panic raised by [`BenchProcess::restart_self`]
#[derive(Debug)]
pub struct RestartRequested;

pub struct World {
    pub now_ms: u64,
    latches: InputLatches,
    /// Scripted rising edges, sorted by time
    presses: Vec<(u64, Input)>,
    /// Answers pressed a fixed delay after the answer buttons are armed
    auto_answers: VecDeque<(Input, u64)>,
    pub levels: [Level; 7],
    track_ms: HashMap<&'static str, u64>,
    failing_track: Option<&'static str>,
    playing: Option<(&'static str, u64)>,
    pub idle_frames: HashMap<&'static str, usize>,
    pub events: Vec<(u64, Event)>,
    pub restarts: usize,
}

impl World {
    fn new() -> Self {
        Self {
            now_ms: 0,
            latches: InputLatches::new(Duration::from_secs(5)),
            presses: Vec::new(),
            auto_answers: VecDeque::new(),
            levels: [Level::Low; 7],
            track_ms: HashMap::new(),
            failing_track: None,
            playing: None,
            idle_frames: HashMap::new(),
            events: Vec::new(),
            restarts: 0,
        }
    }

    fn log(&mut self, event: Event) {
        self.events.push((self.now_ms, event));
    }

    /// Deliver every scripted edge that happened up to now
    fn feed_edges(&mut self) {
        let now = self.now_ms;
        let due = self.presses.iter().take_while(|(at, _)| *at <= now).count();
        for (at, input) in self.presses.drain(..due) {
            self.latches.record_edge(input, Instant::from_millis(at));
        }
    }

    fn schedule(&mut self, at: u64, input: Input) {
        let position = self.presses.partition_point(|(time, _)| *time <= at);
        self.presses.insert(position, (at, input));
    }

    fn is_playing(&self) -> bool {
        self.playing.is_some_and(|(_, end)| self.now_ms < end)
    }
}

#[derive(Clone)]
pub struct Bench {
    pub world: Rc<RefCell<World>>,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            world: Rc::new(RefCell::new(World::new())),
        }
    }

    /// Script a rising edge on `input` at `at_ms`
    pub fn press(&self, input: Input, at_ms: u64) -> &Self {
        self.world.borrow_mut().schedule(at_ms, input);
        self
    }

    /// Answer the next armed question with `input`, `after_ms` after arming
    pub fn answer(&self, input: Input, after_ms: u64) -> &Self {
        self.world
            .borrow_mut()
            .auto_answers
            .push_back((input, after_ms));
        self
    }

    pub fn track(&self, name: &'static str, duration_ms: u64) -> &Self {
        self.world.borrow_mut().track_ms.insert(name, duration_ms);
        self
    }

    /// Leave an output at `level` before the show starts
    pub fn set_level(&self, output: Output, level: Level) -> &Self {
        self.world.borrow_mut().levels[output.index()] = level;
        self
    }

    /// Leave a button armed before the show starts
    pub fn leave_armed(&self, input: Input) -> &Self {
        self.world.borrow().latches.arm(input);
        self
    }

    pub fn fail_track(&self, name: &'static str) -> &Self {
        self.world.borrow_mut().failing_track = Some(name);
        self
    }

    pub fn now_ms(&self) -> u64 {
        self.world.borrow().now_ms
    }

    pub fn events(&self) -> Vec<(u64, Event)> {
        self.world.borrow().events.clone()
    }

    /// Times at which `event` was logged
    pub fn times_of(&self, event: Event) -> Vec<u64> {
        self.world
            .borrow()
            .events
            .iter()
            .filter(|(_, logged)| *logged == event)
            .map(|(at, _)| *at)
            .collect()
    }

    /// Tracks in the order they were started
    pub fn played(&self) -> Vec<&'static str> {
        self.world
            .borrow()
            .events
            .iter()
            .filter_map(|(_, event)| match event {
                Event::Play(track) => Some(*track),
                _ => None,
            })
            .collect()
    }

    pub fn level(&self, output: Output) -> Level {
        self.world.borrow().levels[output.index()]
    }

    pub fn is_armed(&self, input: Input) -> bool {
        self.world.borrow().latches.latch(input).is_armed()
    }

    pub fn idle_frames(&self, scope: IdleScope) -> usize {
        self.world
            .borrow()
            .idle_frames
            .get(scope_key(scope))
            .copied()
            .unwrap_or(0)
    }

    pub fn restarts(&self) -> usize {
        self.world.borrow().restarts
    }

    pub fn hardware(&self) -> HardwareContext<BenchIo, BenchAudio, BenchVisuals, BenchClock> {
        HardwareContext::new(
            BenchIo(self.world.clone()),
            BenchAudio(self.world.clone()),
            BenchVisuals(self.world.clone()),
            BenchClock(self.world.clone()),
        )
    }

    pub fn process(&self) -> BenchProcess {
        BenchProcess(self.world.clone())
    }

    pub fn driver(&self, config: ShowConfig) -> BenchDriver {
        SessionDriver::new(config, INDICATORS, self.hardware(), self.process())
            .expect("bench config is valid")
    }
}

pub type BenchDriver = SessionDriver<BenchIo, BenchAudio, BenchVisuals, BenchClock, BenchProcess>;

/// Run `f`, turning a requested restart into `Err(())`
pub fn catch_restart<R>(f: impl FnOnce() -> R) -> Result<R, ()> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        assert!(
            payload.is::<RestartRequested>(),
            "unexpected panic instead of a restart"
        );
    })
}

fn scope_key(scope: IdleScope) -> &'static str {
    match scope {
        IdleScope::FullStrip => "full",
        IdleScope::Strand => "strand",
    }
}

pub struct BenchIo(Rc<RefCell<World>>);

impl DigitalIo for BenchIo {
    fn arm(&mut self, input: Input) -> Result<(), HardwareError> {
        let mut world = self.0.borrow_mut();
        world.latches.arm(input);
        world.log(Event::Arm(input));
        if input == Input::Yes {
            if let Some((answer, after)) = world.auto_answers.pop_front() {
                let at = world.now_ms + after;
                world.schedule(at, answer);
            }
        }
        Ok(())
    }

    fn disarm(&mut self, input: Input) -> Result<(), HardwareError> {
        let mut world = self.0.borrow_mut();
        world.latches.disarm(input);
        world.log(Event::Disarm(input));
        Ok(())
    }

    fn detected(&mut self, input: Input) -> Result<bool, HardwareError> {
        let mut world = self.0.borrow_mut();
        world.feed_edges();
        Ok(world.latches.take(input))
    }

    fn drive(&mut self, output: Output, level: Level) -> Result<(), HardwareError> {
        let mut world = self.0.borrow_mut();
        world.levels[output.index()] = level;
        world.log(Event::Drive(output, level));
        Ok(())
    }
}

pub struct BenchAudio(Rc<RefCell<World>>);

impl AudioPlayer for BenchAudio {
    fn play(&mut self, track: TrackId) -> Result<(), HardwareError> {
        let mut world = self.0.borrow_mut();
        if world.failing_track == Some(track.name()) {
            return Err(HardwareError::TrackUnavailable(track));
        }
        let duration = world
            .track_ms
            .get(track.name())
            .copied()
            .unwrap_or(DEFAULT_TRACK_MS);
        let end = world.now_ms + duration;
        world.playing = Some((track.name(), end));
        world.log(Event::Play(track.name()));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HardwareError> {
        let mut world = self.0.borrow_mut();
        world.playing = None;
        world.log(Event::Stop);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.0.borrow().is_playing()
    }
}

pub struct BenchVisuals(Rc<RefCell<World>>);

impl Visuals for BenchVisuals {
    fn render_idle_frame(&mut self, scope: IdleScope, _now: Instant) -> Result<(), HardwareError> {
        *self
            .0
            .borrow_mut()
            .idle_frames
            .entry(scope_key(scope))
            .or_default() += 1;
        Ok(())
    }

    fn render_highlight_flourish(&mut self, _now: Instant) -> Result<(), HardwareError> {
        self.0.borrow_mut().log(Event::Flourish);
        Ok(())
    }

    fn set_indicator(&mut self, index: usize, on: bool) -> Result<(), HardwareError> {
        if index >= INDICATORS {
            return Err(HardwareError::NoSuchIndicator(index));
        }
        self.0.borrow_mut().log(Event::Indicator(index, on));
        Ok(())
    }

    fn clear_indicators(&mut self) -> Result<(), HardwareError> {
        self.0.borrow_mut().log(Event::ClearIndicators);
        Ok(())
    }
}

pub struct BenchClock(Rc<RefCell<World>>);

impl Clock for BenchClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.0.borrow().now_ms)
    }

    fn delay(&mut self, duration: Duration) {
        let mut world = self.0.borrow_mut();
        world.now_ms += duration.as_millis();
        world.feed_edges();
    }
}

pub struct BenchProcess(Rc<RefCell<World>>);

impl ProcessControl for BenchProcess {
    fn restart_self(&mut self) -> ! {
        self.0.borrow_mut().restarts += 1;
        std::panic::panic_any(RestartRequested)
    }
}
