//! Rainbow cycling effect
//!
//! Spreads one full turn of the color wheel across the target area and
//! rotates it by one wheel position per step.

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::color::{Rgb, wheel};

const DEFAULT_STEP_MS: u64 = 10;
/// Wheel positions visited per cycle
const CYCLE_STEPS: u64 = 255;

#[derive(Debug, Clone)]
pub struct RainbowCycleEffect {
    /// Time between wheel positions
    step: Duration,
}

impl Default for RainbowCycleEffect {
    fn default() -> Self {
        Self {
            step: Duration::from_millis(DEFAULT_STEP_MS),
        }
    }
}

impl RainbowCycleEffect {
    /// Set the time between wheel positions
    #[must_use]
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Wheel offset at the given time
    #[allow(clippy::cast_possible_truncation)]
    fn offset(&self, now: Instant) -> usize {
        let step_ms = self.step.as_millis().max(1);
        ((now.as_millis() / step_ms) % CYCLE_STEPS) as usize
    }
}

impl Effect for RainbowCycleEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let count = leds.len();
        let offset = self.offset(now);
        for (i, led) in leds.iter_mut().enumerate() {
            let position = (i * 256 / count) + offset;
            *led = wheel((position & 255) as u8);
        }
    }
}
