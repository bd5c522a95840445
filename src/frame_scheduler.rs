//! Poll pacing
//!
//! Keeps the cooperative control loop at a steady rate without async/await
//! or platform-specific timers. The caller is responsible for sleeping
//! between polls, usually through [`Clock::delay`](crate::Clock::delay).

use embassy_time::{Duration, Instant};

/// Default pause between two polls.
///
/// Short enough that a button edge is noticed well within 10 ms.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(DEFAULT_POLL_INTERVAL);
///
/// loop {
///     poll_inputs_and_render();
///     let result = scheduler.tick(clock.now());
///     clock.delay(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    next_frame: Instant,
    frame_duration: Duration,
}

impl FrameScheduler {
    pub const fn new(frame_duration: Duration) -> Self {
        Self {
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Close the current frame and return timing information.
    ///
    /// If we have fallen more than two frames behind (a long blocking
    /// effect, a slow pixel push), the schedule restarts from `now` instead
    /// of bursting through the backlog.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
